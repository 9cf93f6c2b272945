mod show_history_of_project;
mod show_log_of_unknown_project_fails;
