use crate::error::VideoFilterError;

/// The value of an element property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyValue {
    /// A floating point value.
    Double(f64),
    /// An integer value.
    Int(i32),
    /// A boolean value.
    Bool(bool),
}

impl PropertyValue {
    /// Name of the value type.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Double(_) => "double",
            PropertyValue::Int(_) => "int",
            PropertyValue::Bool(_) => "bool",
        }
    }

    /// The value as `f64`, if it is a double.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            PropertyValue::Double(v) => Some(v),
            _ => None,
        }
    }

    /// The value as `i32`, if it is an integer.
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            PropertyValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// The value as `bool`, if it is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            PropertyValue::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Double(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl std::fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Double(v) => write!(f, "{v}"),
            PropertyValue::Int(v) => write!(f, "{v}"),
            PropertyValue::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// Type, bounds and default value of a property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PropertyKind {
    /// A bounded floating point property.
    Double {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// Default value.
        default: f64,
    },
    /// A bounded integer property.
    Int {
        /// Lower bound.
        min: i32,
        /// Upper bound.
        max: i32,
        /// Default value.
        default: i32,
    },
    /// A boolean property.
    Bool {
        /// Default value.
        default: bool,
    },
}

/// Description of a property exposed by an element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertySpec {
    /// The property name used to get and set it.
    pub name: &'static str,
    /// A short human readable name.
    pub nick: &'static str,
    /// A one line description.
    pub blurb: &'static str,
    /// Type, bounds and default.
    pub kind: PropertyKind,
}

impl PropertySpec {
    /// The default value of the property.
    pub fn default_value(&self) -> PropertyValue {
        match self.kind {
            PropertyKind::Double { default, .. } => PropertyValue::Double(default),
            PropertyKind::Int { default, .. } => PropertyValue::Int(default),
            PropertyKind::Bool { default } => PropertyValue::Bool(default),
        }
    }

    /// Check the type and bounds of a value for this property.
    ///
    /// # Errors
    ///
    /// Returns [`VideoFilterError::InvalidPropertyType`] if the value has the
    /// wrong type and [`VideoFilterError::PropertyOutOfRange`] if it is outside
    /// the bounds.
    pub fn check(&self, value: PropertyValue) -> Result<PropertyValue, VideoFilterError> {
        let out_of_range = |v: f64, min: f64, max: f64| VideoFilterError::PropertyOutOfRange {
            name: self.name.to_string(),
            value: v,
            min,
            max,
        };

        match (self.kind, value) {
            (PropertyKind::Double { min, max, .. }, PropertyValue::Double(v)) => {
                if !(min..=max).contains(&v) {
                    return Err(out_of_range(v, min, max));
                }
            }
            (PropertyKind::Int { min, max, .. }, PropertyValue::Int(v)) => {
                if !(min..=max).contains(&v) {
                    return Err(out_of_range(v as f64, min as f64, max as f64));
                }
            }
            (PropertyKind::Bool { .. }, PropertyValue::Bool(_)) => {}
            _ => {
                return Err(VideoFilterError::InvalidPropertyType {
                    name: self.name.to_string(),
                    expected: self.default_value().type_name(),
                })
            }
        }

        Ok(value)
    }
}

/// Find a property by name.
pub fn find_property<'a>(
    specs: &'a [PropertySpec],
    name: &str,
) -> Result<&'a PropertySpec, VideoFilterError> {
    specs
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| VideoFilterError::UnknownProperty(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIGMA: PropertySpec = PropertySpec {
        name: "sigma",
        nick: "Sigma",
        blurb: "Sigma of the gaussian",
        kind: PropertyKind::Double {
            min: 0.0,
            max: 100.0,
            default: 0.0,
        },
    };

    #[test]
    fn check_bounds_and_type() {
        assert_eq!(SIGMA.check(1.5.into()).ok(), Some(PropertyValue::Double(1.5)));
        assert_eq!(SIGMA.check(100.0.into()).ok(), Some(PropertyValue::Double(100.0)));
        assert!(matches!(
            SIGMA.check((-0.5).into()),
            Err(VideoFilterError::PropertyOutOfRange { .. })
        ));
        assert!(matches!(
            SIGMA.check(1.into()),
            Err(VideoFilterError::InvalidPropertyType {
                expected: "double",
                ..
            })
        ));
    }

    #[test]
    fn lookup() {
        let specs = [SIGMA];
        assert!(find_property(&specs, "sigma").is_ok());
        assert!(matches!(
            find_property(&specs, "radius"),
            Err(VideoFilterError::UnknownProperty(_))
        ));
    }
}
