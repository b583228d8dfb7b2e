//! 坐标向量类型
//!
//! 提供甲板坐标系下的三维向量，以及"替换字段"操作。
//!
//! # 示例
//!
//! ```rust
//! use otbridge_labware::{Vector, VectorPatch};
//!
//! // 未给出的分量默认为 0.0
//! let v = Vector::from_components(Some(10.0), None, Some(5.0));
//! assert_eq!(v, Vector::new(10.0, 0.0, 5.0));
//!
//! // 替换部分字段，返回新副本
//! let lifted = v.replace(VectorPatch::new().z(50.0));
//! assert_eq!(lifted, Vector::new(10.0, 0.0, 50.0));
//! ```

use std::fmt;
use std::ops::{Add, Neg, Sub};

/// 三维坐标向量（毫米）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    /// X 坐标
    pub x: f64,
    /// Y 坐标
    pub y: f64,
    /// Z 坐标
    pub z: f64,
}

impl Vector {
    /// 零向量
    pub const ZERO: Self = Vector::new(0.0, 0.0, 0.0);

    /// 创建新的三维向量
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector { x, y, z }
    }

    /// 从可选分量创建向量
    ///
    /// 缺省分量统一取 0.0。
    pub fn from_components(x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Self {
        Vector {
            x: x.unwrap_or(0.0),
            y: y.unwrap_or(0.0),
            z: z.unwrap_or(0.0),
        }
    }

    /// 替换部分字段，返回修改后的副本（原值不变）
    #[must_use]
    pub fn replace(self, patch: VectorPatch) -> Self {
        Vector {
            x: patch.x.unwrap_or(self.x),
            y: patch.y.unwrap_or(self.y),
            z: patch.z.unwrap_or(self.z),
        }
    }

    /// 向量长度
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// 转为元组 `(x, y, z)`
    pub const fn to_tuple(self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<(f64, f64, f64)> for Vector {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Vector::new(x, y, z)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// 向量字段替换描述
///
/// 每个 `Some` 字段覆盖目标向量的对应分量，`None` 保持原值。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl VectorPatch {
    /// 空替换（不修改任何字段）
    pub const fn new() -> Self {
        VectorPatch {
            x: None,
            y: None,
            z: None,
        }
    }

    pub const fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub const fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub const fn z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// 是否不包含任何替换
    pub const fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.z.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_components_defaults_to_zero() {
        assert_eq!(Vector::from_components(None, None, None), Vector::ZERO);
        assert_eq!(
            Vector::from_components(None, Some(2.5), None),
            Vector::new(0.0, 2.5, 0.0)
        );
    }

    #[test]
    fn test_replace_keeps_original() {
        let v = Vector::new(1.0, 2.0, 3.0);
        let patched = v.replace(VectorPatch::new().x(9.0).z(-1.0));
        assert_eq!(patched, Vector::new(9.0, 2.0, -1.0));
        assert_eq!(v, Vector::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let v = Vector::new(4.0, 5.0, 6.0);
        assert!(VectorPatch::new().is_empty());
        assert_eq!(v.replace(VectorPatch::default()), v);
    }

    #[test]
    fn test_arithmetic_and_display() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Vector::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Vector::new(0.5, 1.5, 2.5));
        assert_eq!(-a, Vector::new(-1.0, -2.0, -3.0));
        assert_eq!(format!("{}", a), "(1.000, 2.000, 3.000)");
        assert!((Vector::new(3.0, 4.0, 0.0).norm() - 5.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_components_roundtrip(
            x in -1.0e6f64..1.0e6,
            y in -1.0e6f64..1.0e6,
            z in -1.0e6f64..1.0e6,
        ) {
            let v = Vector::from_components(Some(x), Some(y), Some(z));
            prop_assert_eq!(v.to_tuple(), (x, y, z));
        }

        #[test]
        fn prop_replace_only_touches_given_fields(
            base in (-1.0e3f64..1.0e3, -1.0e3f64..1.0e3, -1.0e3f64..1.0e3),
            new_y in -1.0e3f64..1.0e3,
        ) {
            let v = Vector::from(base);
            let patched = v.replace(VectorPatch::new().y(new_y));
            prop_assert_eq!(patched.x, v.x);
            prop_assert_eq!(patched.y, new_y);
            prop_assert_eq!(patched.z, v.z);
        }
    }
}
