mod read_operations;
mod write_operations;

pub(crate) use read_operations::ReadOperations;
pub(crate) use write_operations::WriteOperations;
