pub mod config_cmd;
pub mod invoke;
pub mod serve;
pub mod state;
