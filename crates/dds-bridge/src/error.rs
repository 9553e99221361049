// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Result codes crossing the native boundary and the crate error type.

use std::ffi::{CString, NulError};

use dds_sys::{
    DdsReturnCode, Handle, DDS_RETCODE_ALREADY_DELETED, DDS_RETCODE_BAD_PARAMETER,
    DDS_RETCODE_ERROR, DDS_RETCODE_ILLEGAL_OPERATION, DDS_RETCODE_IMMUTABLE_POLICY,
    DDS_RETCODE_INCONSISTENT_POLICY, DDS_RETCODE_NOT_ENABLED, DDS_RETCODE_NO_DATA,
    DDS_RETCODE_OK, DDS_RETCODE_OUT_OF_RESOURCES, DDS_RETCODE_PRECONDITION_NOT_MET,
    DDS_RETCODE_TIMEOUT, DDS_RETCODE_UNSUPPORTED,
};
use thiserror::Error;

/// Uniform result code of the native library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnCode {
    Ok,
    Error,
    Unsupported,
    BadParameter,
    PreconditionNotMet,
    OutOfResources,
    NotEnabled,
    ImmutablePolicy,
    InconsistentPolicy,
    AlreadyDeleted,
    Timeout,
    NoData,
    IllegalOperation,
}

impl ReturnCode {
    /// Decode a raw native code. Unknown values yield `None`.
    pub fn from_raw(raw: DdsReturnCode) -> Option<Self> {
        let code = match raw {
            DDS_RETCODE_OK => Self::Ok,
            DDS_RETCODE_ERROR => Self::Error,
            DDS_RETCODE_UNSUPPORTED => Self::Unsupported,
            DDS_RETCODE_BAD_PARAMETER => Self::BadParameter,
            DDS_RETCODE_PRECONDITION_NOT_MET => Self::PreconditionNotMet,
            DDS_RETCODE_OUT_OF_RESOURCES => Self::OutOfResources,
            DDS_RETCODE_NOT_ENABLED => Self::NotEnabled,
            DDS_RETCODE_IMMUTABLE_POLICY => Self::ImmutablePolicy,
            DDS_RETCODE_INCONSISTENT_POLICY => Self::InconsistentPolicy,
            DDS_RETCODE_ALREADY_DELETED => Self::AlreadyDeleted,
            DDS_RETCODE_TIMEOUT => Self::Timeout,
            DDS_RETCODE_NO_DATA => Self::NoData,
            DDS_RETCODE_ILLEGAL_OPERATION => Self::IllegalOperation,
            _ => return None,
        };
        Some(code)
    }

    pub fn to_raw(self) -> DdsReturnCode {
        match self {
            Self::Ok => DDS_RETCODE_OK,
            Self::Error => DDS_RETCODE_ERROR,
            Self::Unsupported => DDS_RETCODE_UNSUPPORTED,
            Self::BadParameter => DDS_RETCODE_BAD_PARAMETER,
            Self::PreconditionNotMet => DDS_RETCODE_PRECONDITION_NOT_MET,
            Self::OutOfResources => DDS_RETCODE_OUT_OF_RESOURCES,
            Self::NotEnabled => DDS_RETCODE_NOT_ENABLED,
            Self::ImmutablePolicy => DDS_RETCODE_IMMUTABLE_POLICY,
            Self::InconsistentPolicy => DDS_RETCODE_INCONSISTENT_POLICY,
            Self::AlreadyDeleted => DDS_RETCODE_ALREADY_DELETED,
            Self::Timeout => DDS_RETCODE_TIMEOUT,
            Self::NoData => DDS_RETCODE_NO_DATA,
            Self::IllegalOperation => DDS_RETCODE_ILLEGAL_OPERATION,
        }
    }
}

/// Errors returned by the boundary layer.
///
/// The first twelve variants are the native result codes, passed through
/// unchanged. The rest are raised on this side of the boundary.
#[derive(Debug, Error)]
pub enum Error {
    #[error("generic error")]
    Error,
    #[error("unsupported operation")]
    Unsupported,
    #[error("bad parameter")]
    BadParameter,
    #[error("precondition not met")]
    PreconditionNotMet,
    #[error("out of resources")]
    OutOfResources,
    #[error("entity not enabled")]
    NotEnabled,
    #[error("immutable policy")]
    ImmutablePolicy,
    #[error("inconsistent policy")]
    InconsistentPolicy,
    #[error("entity already deleted")]
    AlreadyDeleted,
    #[error("timeout")]
    Timeout,
    #[error("no data")]
    NoData,
    #[error("illegal operation")]
    IllegalOperation,

    /// The library returned a code outside the documented set.
    #[error("unknown native return code {0}")]
    UnknownReturnCode(DdsReturnCode),
    /// A second wrapper was about to be registered for a live handle.
    #[error("handle {0} is already registered")]
    DuplicateHandle(Handle),
    /// A handle resolved to a wrapper of another kind.
    #[error("handle {handle} resolved to a {found}, expected a {expected}")]
    UnexpectedKind {
        handle: Handle,
        expected: &'static str,
        found: &'static str,
    },
    #[error(transparent)]
    Nul(#[from] NulError),
}

impl Error {
    /// Result code this error corresponds to on the native side.
    pub fn return_code(&self) -> ReturnCode {
        match self {
            Self::Error | Self::UnknownReturnCode(_) => ReturnCode::Error,
            Self::Unsupported => ReturnCode::Unsupported,
            Self::BadParameter | Self::Nul(_) => ReturnCode::BadParameter,
            Self::PreconditionNotMet | Self::DuplicateHandle(_) | Self::UnexpectedKind { .. } => {
                ReturnCode::PreconditionNotMet
            }
            Self::OutOfResources => ReturnCode::OutOfResources,
            Self::NotEnabled => ReturnCode::NotEnabled,
            Self::ImmutablePolicy => ReturnCode::ImmutablePolicy,
            Self::InconsistentPolicy => ReturnCode::InconsistentPolicy,
            Self::AlreadyDeleted => ReturnCode::AlreadyDeleted,
            Self::Timeout => ReturnCode::Timeout,
            Self::NoData => ReturnCode::NoData,
            Self::IllegalOperation => ReturnCode::IllegalOperation,
        }
    }

    fn from_code(code: ReturnCode) -> Option<Self> {
        let err = match code {
            ReturnCode::Ok => return None,
            ReturnCode::Error => Self::Error,
            ReturnCode::Unsupported => Self::Unsupported,
            ReturnCode::BadParameter => Self::BadParameter,
            ReturnCode::PreconditionNotMet => Self::PreconditionNotMet,
            ReturnCode::OutOfResources => Self::OutOfResources,
            ReturnCode::NotEnabled => Self::NotEnabled,
            ReturnCode::ImmutablePolicy => Self::ImmutablePolicy,
            ReturnCode::InconsistentPolicy => Self::InconsistentPolicy,
            ReturnCode::AlreadyDeleted => Self::AlreadyDeleted,
            ReturnCode::Timeout => Self::Timeout,
            ReturnCode::NoData => Self::NoData,
            ReturnCode::IllegalOperation => Self::IllegalOperation,
        };
        Some(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Turn a raw native code into a `Result`.
pub fn check(raw: DdsReturnCode) -> Result<()> {
    match ReturnCode::from_raw(raw) {
        Some(code) => Error::from_code(code).map_or(Ok(()), Err),
        None => Err(Error::UnknownReturnCode(raw)),
    }
}

/// Treat a null handle from a factory call as a generic failure.
pub(crate) fn non_null(handle: Handle) -> Result<Handle> {
    if handle.is_null() {
        Err(Error::Error)
    } else {
        Ok(handle)
    }
}

/// Reject text that the native side would see truncated at a NUL byte.
pub(crate) fn no_interior_nul<S: AsRef<str>>(values: &[S]) -> Result<()> {
    for value in values {
        CString::new(value.as_ref())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_nul_is_a_bad_parameter() {
        assert!(no_interior_nul(&["a", "b c", ""]).is_ok());
        let err = no_interior_nul(&["ok", "a\0b"]).expect_err("NUL must be rejected");
        assert!(matches!(err, Error::Nul(_)));
        assert_eq!(err.return_code(), ReturnCode::BadParameter);
    }

    #[test]
    fn ok_maps_to_ok() {
        assert!(check(DDS_RETCODE_OK).is_ok());
    }

    #[test]
    fn every_code_passes_through_unchanged() {
        for raw in DDS_RETCODE_ERROR..=DDS_RETCODE_ILLEGAL_OPERATION {
            let err = check(raw).expect_err("non-zero code must fail");
            assert_eq!(err.return_code().to_raw(), raw);
        }
    }

    #[test]
    fn unknown_code_is_preserved() {
        match check(42) {
            Err(Error::UnknownReturnCode(42)) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn nul_errors_are_bad_parameters() {
        let nul = std::ffi::CString::new("a\0b").expect_err("interior nul");
        assert_eq!(Error::from(nul).return_code(), ReturnCode::BadParameter);
    }

    #[test]
    fn null_handle_is_an_error() {
        assert!(matches!(non_null(Handle::NULL), Err(Error::Error)));
    }
}
