mod construct;
mod errors;
mod factories;
mod methods;
