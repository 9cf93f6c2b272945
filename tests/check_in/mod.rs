mod check_in_single_file_records_artifact;
mod check_in_unknown_project_fails;
