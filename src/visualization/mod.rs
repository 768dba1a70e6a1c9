mod tables;

pub use tables::{
    format_estimate_table, format_measurement, print_estimate_table, print_measurement,
};
