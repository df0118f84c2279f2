pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// Verifies a codec invariant, raising a logical error when it does not hold.
#[macro_export]
macro_rules! verify_data {
    ($name:expr, $expr:expr) => {{
        let result = $expr;
        $crate::result::verify_data(result, stringify!($name), stringify!($expr))?;
    }};
}

pub fn verify_data(predicate: bool, name: &str, condition: &str) -> Result<()> {
    if predicate {
        Ok(())
    } else {
        Err(crate::error::Error::logical(format!("{name}: {condition}")))
    }
}
