pub mod libsql;
pub mod supabase;
