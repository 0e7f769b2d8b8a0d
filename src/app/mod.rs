pub mod convert_use_case;
pub mod create_quiz_use_case;
pub mod ports;
