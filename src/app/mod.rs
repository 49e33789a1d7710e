mod run;

pub use run::run_user_command;
