pub mod image_record;
pub mod paths;
pub mod target_size;
