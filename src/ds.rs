mod value_table;

pub use value_table::{Grid, ValueTable};
