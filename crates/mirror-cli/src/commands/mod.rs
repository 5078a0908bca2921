//! Command implementations

mod backup;
mod config;

pub use backup::{run_backup, run_backup_all};
pub use config::{
    run_config_add, run_config_path, run_config_remove, run_config_show, run_config_validate,
};
