pub mod prelude;

pub mod device;
