pub mod util;

#[cfg(test)]
mod mesh;
#[cfg(test)]
mod negative;
