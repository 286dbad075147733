pub mod answer_parser;
pub mod cli;
pub mod clock;
pub mod error;
pub mod grader;
pub mod gui;
pub mod number_generator;
pub mod operations;
pub mod report;
pub mod session;
pub mod time_format;
