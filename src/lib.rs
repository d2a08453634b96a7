pub mod constants;
pub mod junit;
pub mod paths;
pub mod runner;
pub mod scanner;
pub mod sonar;
