use crate::error::NtientError;
use crate::packager::Framework;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Model types accepted by the hosting service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModelType {
    SklearnDecisionTreeClassifier,
    SklearnDecisionTreeRegressor,
    SklearnRandomForestClassifier,
    SklearnRandomForestRegressor,
    SklearnLinearRegression,
    SklearnLogisticRegression,
    SklearnSvc,
    SklearnKNeighborsClassifier,
    Keras,
    Pytorch,
}

impl ModelType {
    pub const ALL: [Self; 10] = [
        Self::SklearnDecisionTreeClassifier,
        Self::SklearnDecisionTreeRegressor,
        Self::SklearnRandomForestClassifier,
        Self::SklearnRandomForestRegressor,
        Self::SklearnLinearRegression,
        Self::SklearnLogisticRegression,
        Self::SklearnSvc,
        Self::SklearnKNeighborsClassifier,
        Self::Keras,
        Self::Pytorch,
    ];

    /// Wire name, e.g. `sklearn DecisionTreeClassifier`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SklearnDecisionTreeClassifier => "sklearn DecisionTreeClassifier",
            Self::SklearnDecisionTreeRegressor => "sklearn DecisionTreeRegressor",
            Self::SklearnRandomForestClassifier => "sklearn RandomForestClassifier",
            Self::SklearnRandomForestRegressor => "sklearn RandomForestRegressor",
            Self::SklearnLinearRegression => "sklearn LinearRegression",
            Self::SklearnLogisticRegression => "sklearn LogisticRegression",
            Self::SklearnSvc => "sklearn SVC",
            Self::SklearnKNeighborsClassifier => "sklearn KNeighborsClassifier",
            Self::Keras => "keras",
            Self::Pytorch => "pytorch",
        }
    }

    #[must_use]
    pub const fn framework(self) -> Framework {
        match self {
            Self::Keras => Framework::Keras,
            Self::Pytorch => Framework::Pytorch,
            _ => Framework::Sklearn,
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = NtientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| NtientError::Config(format!("Model Type: {s} not supported.")))
    }
}

impl TryFrom<String> for ModelType {
    type Error = NtientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModelType> for String {
    fn from(value: ModelType) -> Self {
        value.as_str().to_string()
    }
}
