//! Operations produced by the resolver and consumed by the installation manager

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::package::Package;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallOperation {
    pub package: Package,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOperation {
    pub initial: Package,

    pub target: Package,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UninstallOperation {
    pub package: Package,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl InstallOperation {
    pub fn new(package: Package) -> Self {
        Self {
            package,
            reason: None,
        }
    }
}

impl UpdateOperation {
    pub fn new(initial: Package, target: Package) -> Self {
        Self {
            initial,
            target,
            reason: None,
        }
    }

    /// Whether the package changes type and therefore installer
    pub fn changes_type(&self) -> bool {
        self.initial.package_type != self.target.package_type
    }
}

impl UninstallOperation {
    pub fn new(package: Package) -> Self {
        Self {
            package,
            reason: None,
        }
    }
}

/// A single job, serialized as `{"job": "install", ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "job", rename_all = "lowercase")]
pub enum Operation {
    Install(InstallOperation),
    Update(UpdateOperation),
    Uninstall(UninstallOperation),
}

impl Operation {
    pub fn job_type(&self) -> &'static str {
        match self {
            Operation::Install(_) => "install",
            Operation::Update(_) => "update",
            Operation::Uninstall(_) => "uninstall",
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Operation::Install(op) => op.reason.as_deref(),
            Operation::Update(op) => op.reason.as_deref(),
            Operation::Uninstall(op) => op.reason.as_deref(),
        }
    }
}

impl From<InstallOperation> for Operation {
    fn from(op: InstallOperation) -> Self {
        Operation::Install(op)
    }
}

impl From<UpdateOperation> for Operation {
    fn from(op: UpdateOperation) -> Self {
        Operation::Update(op)
    }
}

impl From<UninstallOperation> for Operation {
    fn from(op: UninstallOperation) -> Self {
        Operation::Uninstall(op)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Install(op) => write!(f, "Installing {}", op.package),
            Operation::Update(op) => write!(f, "Updating {} to {}", op.initial, op.target),
            Operation::Uninstall(op) => write!(f, "Uninstalling {}", op.package),
        }
    }
}
