/// The single `<failure>` reported for a test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub body: Option<String>,
}

impl Failure {
    /// Folds the `message` attributes of every raw `<failure>` of one test
    /// case into one failure. All messages are split on `\n` into one flat
    /// list of lines: the first line is the message, the rest (if any) the
    /// body. Returns `None` when there were no failures at all.
    pub fn aggregate<'a, I>(messages: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut messages = messages.into_iter().peekable();
        messages.peek()?;

        let mut lines = messages.flat_map(|message| message.split('\n'));
        let message = lines.next().unwrap_or_default().to_string();
        let rest: Vec<&str> = lines.collect();
        let body = if rest.is_empty() {
            None
        } else {
            Some(rest.join("\n"))
        };

        Some(Self { message, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_failures() {
        assert_eq!(Failure::aggregate(Vec::<&str>::new()), None);
    }

    #[test]
    fn single_line() {
        assert_eq!(
            Failure::aggregate(["Failed"]),
            Some(Failure {
                message: "Failed".into(),
                body: None
            })
        );
    }

    #[test]
    fn missing_message_is_an_empty_line() {
        assert_eq!(
            Failure::aggregate([""]),
            Some(Failure {
                message: String::new(),
                body: None
            })
        );
    }

    #[test]
    fn multiple_failures_flatten_into_the_body() {
        assert_eq!(
            Failure::aggregate(["line1\nline2", "line3"]),
            Some(Failure {
                message: "line1".into(),
                body: Some("line2\nline3".into())
            })
        );
    }

    #[test]
    fn gtest_assertion_message() {
        let message = "src/math.cpp:12\nExpected equality of these values:\n  1\n  2";
        let failure = Failure::aggregate([message]).unwrap();
        assert_eq!(failure.message, "src/math.cpp:12");
        assert_eq!(
            failure.body.as_deref(),
            Some("Expected equality of these values:\n  1\n  2")
        );
    }

    #[test]
    fn blank_second_failure_still_produces_a_body() {
        let failure = Failure::aggregate(["first", ""]).unwrap();
        assert_eq!(failure.message, "first");
        assert_eq!(failure.body.as_deref(), Some(""));
    }
}
