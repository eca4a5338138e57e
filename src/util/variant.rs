use std::fmt;

// Actorの引数の値
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Int(i32),
    Bool(bool),
}

impl Variant {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            &Self::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            &Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    // targetと同じ型としてvalueを解釈
    pub fn parse_as(target: &Variant, value: &str) -> Result<Variant, String> {
        Ok(match target {
            Variant::Int(_) => Variant::Int(value.parse::<i32>().map_err(|e| e.to_string())?),
            Variant::Bool(_) => Variant::Bool(value.parse::<bool>().map_err(|e| e.to_string())?),
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Arg {
    pub name: String,
    pub value: Variant,
}

impl Arg {
    pub fn int(name: &str, value: i32) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::Int(value),
        }
    }

    pub fn bool(name: &str, value: bool) -> Self {
        Self {
            name: name.to_string(),
            value: Variant::Bool(value),
        }
    }
}

#[test]
fn test_parse_as() {
    let v = Variant::parse_as(&Variant::Bool(false), "true").unwrap();
    assert_eq!(v.as_bool(), Some(true));
    assert!(Variant::parse_as(&Variant::Int(0), "x").is_err());
}
