pub mod directory_path;
pub mod output_directory;
pub mod path_error;
