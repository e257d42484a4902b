/// Generate, evaluate and review orchestration
pub mod executor;
/// Random expression tree generation
pub mod generator;
/// Quality review of evaluated grids
pub mod review;
/// Modulus and color mode selection
pub mod selection;
