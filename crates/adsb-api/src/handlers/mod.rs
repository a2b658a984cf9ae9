pub mod aircraft;
