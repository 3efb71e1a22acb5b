/// Behaviour differences between CHIP-8 interpreters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profile {
    /// 8xy6/8xyE copy Vy into Vx before shifting.
    pub shift_uses_vy: bool,
    /// Fx55/Fx65 leave I pointing past the last register transferred.
    pub load_store_increments_i: bool,
}

impl Profile {
    /// COSMAC VIP interpreter.
    pub fn original() -> Profile {
        Profile {
            shift_uses_vy: true,
            load_store_increments_i: true,
        }
    }

    pub fn modern() -> Profile {
        Profile {
            shift_uses_vy: false,
            load_store_increments_i: false,
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::modern()
    }
}

impl std::str::FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(Profile::original()),
            "modern" => Ok(Profile::modern()),
            other => Err(format!("unknown profile '{}'", other)),
        }
    }
}
