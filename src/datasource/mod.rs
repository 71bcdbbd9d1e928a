mod dump;
mod txtfile;

pub use dump::{write_bank, write_matrix, DumpError};
pub use txtfile::{read_matrix, read_matrix_from, TextSourceError};
