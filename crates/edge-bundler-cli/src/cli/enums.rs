use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ECMAScript target version
///
/// Syntax newer than the target is lowered before the bundle is written.
/// Edge runtimes accept ES2018 everywhere, so that is the default.
#[derive(
    Copy, Clone, Default, PartialEq, Eq, Debug, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum EsTarget {
    /// ECMAScript 2015 (ES6)
    #[value(name = "es2015")]
    Es2015,

    /// ECMAScript 2016
    ///
    /// Adds: exponentiation operator (**)
    #[value(name = "es2016")]
    Es2016,

    /// ECMAScript 2017
    ///
    /// Adds: async/await
    #[value(name = "es2017")]
    Es2017,

    /// ECMAScript 2018
    ///
    /// Adds: async iteration, rest/spread properties
    #[default]
    #[value(name = "es2018")]
    Es2018,

    /// ECMAScript 2019
    ///
    /// Adds: optional catch binding
    #[value(name = "es2019")]
    Es2019,

    /// ECMAScript 2020
    ///
    /// Adds: optional chaining (?.), nullish coalescing (??)
    #[value(name = "es2020")]
    Es2020,

    /// ECMAScript 2021
    ///
    /// Adds: logical assignment operators
    #[value(name = "es2021")]
    Es2021,

    /// ECMAScript 2022
    ///
    /// Adds: class fields, top-level await
    #[value(name = "es2022")]
    Es2022,

    /// Latest ECMAScript features, no lowering
    #[value(name = "esnext")]
    Esnext,
}

impl EsTarget {
    /// Target string understood by the bundler.
    pub fn as_str(&self) -> &'static str {
        match self {
            EsTarget::Es2015 => "es2015",
            EsTarget::Es2016 => "es2016",
            EsTarget::Es2017 => "es2017",
            EsTarget::Es2018 => "es2018",
            EsTarget::Es2019 => "es2019",
            EsTarget::Es2020 => "es2020",
            EsTarget::Es2021 => "es2021",
            EsTarget::Es2022 => "es2022",
            EsTarget::Esnext => "esnext",
        }
    }
}

impl std::fmt::Display for EsTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
