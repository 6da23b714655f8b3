pub mod ask;
pub mod config_cmd;
pub mod doctor;
pub mod fetch;
pub mod serve;
