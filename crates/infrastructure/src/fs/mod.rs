pub mod file_reader;

pub use file_reader::{read_file, FileReader};
