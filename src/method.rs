//! Chromatographic methods and per-method value tables.
//!
//! Every reference table carries one RT column (and, for substances, one LRI
//! column) per method. The column names in the workbook are built from a
//! short suffix, e.g. `RT_DB5ms_SID` or `IRL_4m`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A column/temperature-program combination with its own reference values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Method {
    /// DB-1ms
    Db1ms,
    /// HP-5ms
    Hp5ms,
    /// DB-5ms, SID program
    Db5msSid,
    /// DB-5ms, MARGGIE program
    Db5msMarggie,
    /// DB1-ms, 4 m column
    Db1ms4m,
}

impl Method {
    /// Number of supported methods.
    pub const COUNT: usize = 5;

    /// All methods in selector order.
    pub const ALL: [Method; Method::COUNT] = [
        Method::Db1ms,
        Method::Hp5ms,
        Method::Db5msSid,
        Method::Db5msMarggie,
        Method::Db1ms4m,
    ];

    /// User-facing method name.
    pub fn label(&self) -> &'static str {
        match self {
            Method::Db1ms => "DB-1ms",
            Method::Hp5ms => "HP-5ms",
            Method::Db5msSid => "DB-5ms(SID)",
            Method::Db5msMarggie => "DB-5ms(MARGGIE)",
            Method::Db1ms4m => "DB1-ms-4m",
        }
    }

    /// Suffix used by the reference workbook column names.
    pub fn column_suffix(&self) -> &'static str {
        match self {
            Method::Db1ms => "DB1ms",
            Method::Hp5ms => "HP5ms",
            Method::Db5msSid => "DB5ms_SID",
            Method::Db5msMarggie => "DB5ms_MARGGIE",
            Method::Db1ms4m => "4m",
        }
    }

    /// Name of the retention time column for this method.
    pub fn rt_column(&self) -> String {
        format!("RT_{}", self.column_suffix())
    }

    /// Name of the reference LRI column for this method.
    pub fn lri_column(&self) -> String {
        format!("IRL_{}", self.column_suffix())
    }

    fn index(&self) -> usize {
        match self {
            Method::Db1ms => 0,
            Method::Hp5ms => 1,
            Method::Db5msSid => 2,
            Method::Db5msMarggie => 3,
            Method::Db1ms4m => 4,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a method name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Method::ALL
            .into_iter()
            .find(|m| {
                m.label().eq_ignore_ascii_case(wanted)
                    || m.column_suffix().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownMethod(wanted.to_string()))
    }
}

/// One optional value per method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodValues {
    values: [Option<f64>; Method::COUNT],
}

impl MethodValues {
    /// Create a table with every slot empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for the given method, if present
    pub fn get(&self, method: Method) -> Option<f64> {
        self.values[method.index()]
    }

    /// Set (or clear) the value for the given method
    pub fn set(&mut self, method: Method, value: Option<f64>) {
        self.values[method.index()] = value;
    }

    /// Builder-style variant of [`MethodValues::set`]
    pub fn with(mut self, method: Method, value: f64) -> Self {
        self.set(method, Some(value));
        self
    }

    /// Iterate over methods that have a value
    pub fn iter(&self) -> impl Iterator<Item = (Method, f64)> + '_ {
        Method::ALL
            .into_iter()
            .filter_map(|m| self.get(m).map(|v| (m, v)))
    }
}
