pub mod identity;
pub mod in_memory;
pub mod product;

pub use identity::PostgresIdentityRepository;
pub use in_memory::InMemoryIdentityRepository;
pub use in_memory::InMemoryProductRepository;
pub use product::PostgresProductRepository;
