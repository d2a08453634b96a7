use std::path::Path;

/// Rewrites `file_key` relative to `base_dir`.
///
/// Only keys that live under `base_dir` are rewritten. Anything else, including
/// relative keys, keys on another root and the base directory itself, is
/// returned unchanged.
pub fn normalize(file_key: &str, base_dir: Option<&Path>) -> String {
    let Some(base_dir) = base_dir else {
        return file_key.to_string();
    };

    match Path::new(file_key).strip_prefix(base_dir) {
        Ok(relative) if !relative.as_os_str().is_empty() => match relative.to_str() {
            Some(relative) => relative.to_string(),
            None => file_key.to_string(),
        },
        Ok(_) => file_key.to_string(),
        Err(_) => {
            log::trace!(
                "{:?} is not under base directory {:?}, keeping it as is",
                file_key,
                base_dir
            );
            file_key.to_string()
        }
    }
}
