// Copyright 2025 Cowboy AI, LLC.

//! Coefficient rings and their scalars

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Coefficient ring of a free module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ring {
    /// The integers Z
    Integers,
    /// The reals R
    Reals,
    /// Integers modulo n (n >= 2)
    Modular(u64),
}

impl Ring {
    /// False for `Modular(n)` with `n < 2`
    pub fn is_valid(self) -> bool {
        match self {
            Ring::Modular(modulus) => modulus >= 2,
            Ring::Integers | Ring::Reals => true,
        }
    }

    /// True when `self` is `other` or sits inside it canonically (`Z` in `R`)
    pub fn embeds_into(self, other: Ring) -> bool {
        self == other || (self == Ring::Integers && other == Ring::Reals)
    }

    /// Additive identity of the ring
    pub fn zero(self) -> Scalar {
        match self {
            Ring::Integers => Scalar::Integer(0),
            Ring::Reals => Scalar::Real(0.0),
            Ring::Modular(modulus) => Scalar::Modular { value: 0, modulus },
        }
    }

    /// Multiplicative identity of the ring
    pub fn one(self) -> Scalar {
        match self {
            Ring::Integers => Scalar::Integer(1),
            Ring::Reals => Scalar::Real(1.0),
            Ring::Modular(modulus) => Scalar::Modular {
                value: 1 % modulus.max(1),
                modulus,
            },
        }
    }
}

impl Display for Ring {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Ring::Integers => f.write_str("Z"),
            Ring::Reals => f.write_str("R"),
            Ring::Modular(n) => write!(f, "Z{n}"),
        }
    }
}

/// A single ring value
///
/// Reals are ordered and compared with `f64::total_cmp`, which makes the
/// type usable as a key of canonical (sorted) collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Scalar {
    /// Element of Z
    Integer(i64),
    /// Element of R
    Real(f64),
    /// Element of Z/nZ, `value < modulus`
    Modular {
        /// Representative in `0..modulus`
        value: u64,
        /// The modulus n
        modulus: u64,
    },
}

impl Scalar {
    /// Ring this scalar belongs to
    pub fn ring(self) -> Ring {
        match self {
            Scalar::Integer(_) => Ring::Integers,
            Scalar::Real(_) => Ring::Reals,
            Scalar::Modular { modulus, .. } => Ring::Modular(modulus),
        }
    }

    /// Convert into another ring where a canonical embedding exists
    ///
    /// Nothing casts into an invalid ring.
    pub fn cast(self, ring: Ring) -> Option<Scalar> {
        if !ring.is_valid() {
            return None;
        }
        match (self, ring) {
            (s, r) if s.ring() == r => Some(s),
            (Scalar::Integer(v), Ring::Reals) => Some(Scalar::Real(v as f64)),
            (Scalar::Integer(v), Ring::Modular(n)) => Some(Scalar::Modular {
                value: v.rem_euclid(n as i64) as u64,
                modulus: n,
            }),
            (Scalar::Real(v), Ring::Integers) if v.fract() == 0.0 && v.is_finite() => {
                Some(Scalar::Integer(v as i64))
            }
            (Scalar::Modular { value, .. }, Ring::Integers) => Some(Scalar::Integer(value as i64)),
            (Scalar::Modular { value, .. }, Ring::Reals) => Some(Scalar::Real(value as f64)),
            _ => None,
        }
    }

    /// Real approximation used when two rings have to be mixed
    pub fn to_f64(self) -> f64 {
        match self {
            Scalar::Integer(v) => v as f64,
            Scalar::Real(v) => v,
            Scalar::Modular { value, .. } => value as f64,
        }
    }

    /// Ring sum; mixed rings fall back to the reals
    pub fn add(self, other: Scalar) -> Scalar {
        match (self, other) {
            (Scalar::Integer(a), Scalar::Integer(b)) => Scalar::Integer(a.wrapping_add(b)),
            (Scalar::Modular { value: a, modulus }, Scalar::Modular { value: b, modulus: m })
                if modulus == m =>
            {
                Scalar::Modular {
                    value: residue(a as u128 + b as u128, modulus),
                    modulus,
                }
            }
            (a, b) => Scalar::Real(a.to_f64() + b.to_f64()),
        }
    }

    /// Ring product; mixed rings fall back to the reals
    pub fn mul(self, other: Scalar) -> Scalar {
        match (self, other) {
            (Scalar::Integer(a), Scalar::Integer(b)) => Scalar::Integer(a.wrapping_mul(b)),
            (Scalar::Modular { value: a, modulus }, Scalar::Modular { value: b, modulus: m })
                if modulus == m =>
            {
                Scalar::Modular {
                    value: residue(a as u128 * b as u128, modulus),
                    modulus,
                }
            }
            (a, b) => Scalar::Real(a.to_f64() * b.to_f64()),
        }
    }

    /// Additive inverse
    pub fn neg(self) -> Scalar {
        match self {
            Scalar::Integer(v) => Scalar::Integer(v.wrapping_neg()),
            Scalar::Real(v) => Scalar::Real(-v),
            Scalar::Modular { value, modulus } => Scalar::Modular {
                value: residue(modulus as u128 - residue(value as u128, modulus) as u128, modulus),
                modulus,
            },
        }
    }

    /// Ring difference
    pub fn sub(self, other: Scalar) -> Scalar {
        self.add(other.neg())
    }

    fn rank(self) -> u8 {
        match self {
            Scalar::Integer(_) => 0,
            Scalar::Real(_) => 1,
            Scalar::Modular { .. } => 2,
        }
    }
}

// degenerate moduli collapse to zero instead of dividing by zero
fn residue(value: u128, modulus: u64) -> u64 {
    value.checked_rem(modulus as u128).unwrap_or(0) as u64
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Integer(a), Scalar::Integer(b)) => a.cmp(b),
            (Scalar::Real(a), Scalar::Real(b)) => a.total_cmp(b),
            (
                Scalar::Modular { value: a, modulus: m },
                Scalar::Modular { value: b, modulus: n },
            ) => m.cmp(n).then(a.cmp(b)),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Scalar::Integer(v) => v.hash(state),
            Scalar::Real(v) => v.to_bits().hash(state),
            Scalar::Modular { value, modulus } => {
                value.hash(state);
                modulus.hash(state);
            }
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(v) => write!(f, "{v}"),
            Scalar::Real(v) => write!(f, "{v}"),
            Scalar::Modular { value, modulus } => write!(f, "{value} mod {modulus}"),
        }
    }
}
