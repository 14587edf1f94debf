//! Direct object store access: `hash-object` and `cat-file -p`

pub mod cat_file;
pub mod hash_object;
