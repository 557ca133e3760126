//! Repository abstractions.
mod mutable_repository;
mod read_only_repository;

pub use mutable_repository::MutableRepository;
pub use read_only_repository::ReadOnlyRepository;

/// Repository with both read and write access.
pub trait DBRepository<T>: ReadOnlyRepository<T> + MutableRepository<T>
where
    T: Send + Sync + crate::model::AggregateRoot,
{
}
