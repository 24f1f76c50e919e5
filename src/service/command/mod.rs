pub mod headlines;
