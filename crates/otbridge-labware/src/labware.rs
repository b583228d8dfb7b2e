//! 容器（Labware）抽象
//!
//! 枪头盒、孔板等物理容器按位置索引取得孔位（Well），
//! 按排索引取得一整排孔位（Row），多通道移液器以排为单位取枪头。

use crate::error::HardwareError;
use crate::vector::Vector;

/// 单个孔位/枪头位置
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Well {
    /// 孔位名称（如 "A1"）
    pub name: String,
    /// 孔位在甲板坐标系下的位置
    pub position: Vector,
}

impl Well {
    pub fn new(name: impl Into<String>, position: Vector) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// 一排孔位
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// 排索引（从 0 开始）
    pub index: usize,
    /// 该排的孔位，按通道顺序排列
    pub wells: Vec<Well>,
}

impl Row {
    pub fn new(index: usize, wells: Vec<Well>) -> Self {
        Self { index, wells }
    }

    /// 该排第一个孔位
    pub fn first(&self) -> Option<&Well> {
        self.wells.first()
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }
}

/// 容器接口
///
/// 实现者负责索引语义；越界时应返回 [`HardwareError::IndexOutOfRange`]。
pub trait Labware {
    /// 容器名称（用于日志）
    fn name(&self) -> &str;

    /// 按位置索引取孔位
    fn well(&self, index: usize) -> Result<Well, HardwareError>;

    /// 按排索引取一整排
    fn row(&self, index: usize) -> Result<Row, HardwareError>;

    /// 排数
    fn row_count(&self) -> usize;
}

impl<L: Labware + ?Sized> Labware for &L {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn well(&self, index: usize) -> Result<Well, HardwareError> {
        (**self).well(index)
    }

    fn row(&self, index: usize) -> Result<Row, HardwareError> {
        (**self).row(index)
    }

    fn row_count(&self) -> usize {
        (**self).row_count()
    }
}

impl<L: Labware + ?Sized> Labware for Box<L> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn well(&self, index: usize) -> Result<Well, HardwareError> {
        (**self).well(index)
    }

    fn row(&self, index: usize) -> Result<Row, HardwareError> {
        (**self).row(index)
    }

    fn row_count(&self) -> usize {
        (**self).row_count()
    }
}
