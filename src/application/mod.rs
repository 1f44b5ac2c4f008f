pub mod paginator;

pub use paginator::{
    paginate, paginate_in_memory, paginate_in_memory_with, paginate_with, Paginator,
};
