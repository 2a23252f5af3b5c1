pub mod store;
pub mod memory;
pub mod supabase;
pub mod factory;

pub use store::{Record, RecordStore};
pub use memory::MemoryStore;
pub use supabase::{SupabaseClient, SupabaseStore};
pub use factory::StoreFactory;
