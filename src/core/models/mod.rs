pub mod command_result;
