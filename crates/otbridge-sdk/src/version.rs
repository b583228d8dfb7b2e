//! 版本信息
//!
//! `version()` 返回外部控制库的版本；本 crate 自身的版本见 [`SDK_VERSION`]。

use crate::error::SdkError;
use otbridge_labware::ControlLibrary;
use semver::{Version, VersionReq};

/// 本 crate（otbridge-sdk）的版本字符串
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 已安装控制库的版本字符串
pub fn version<L: ControlLibrary + ?Sized>(library: &L) -> &str {
    library.library_version()
}

/// 解析后的控制库版本号
pub fn parsed_version<L: ControlLibrary + ?Sized>(library: &L) -> Result<Version, SdkError> {
    Ok(Version::parse(version(library))?)
}

/// 检查控制库版本是否满足版本要求（如 `">=3.19, <4"`）
pub fn satisfies<L: ControlLibrary + ?Sized>(
    library: &L,
    requirement: &str,
) -> Result<bool, SdkError> {
    let req = VersionReq::parse(requirement)?;
    Ok(req.matches(&parsed_version(library)?))
}

/// 本 crate 的版本号
pub fn sdk_version() -> Result<Version, SdkError> {
    Ok(Version::parse(SDK_VERSION)?)
}
