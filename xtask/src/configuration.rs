/// A single build configuration of the generated projects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Configuration {
    Debug,
    Release,
}

impl Configuration {
    /// Name used by MSBuild, Xcode and the output folders.
    pub fn name(self) -> &'static str {
        match self {
            Configuration::Debug => "Debug",
            Configuration::Release => "Release",
        }
    }

    /// premake's gmake `config=` value.
    pub fn make_config(self) -> &'static str {
        match self {
            Configuration::Debug => "debug_x86_64",
            Configuration::Release => "release_x86_64",
        }
    }
}

/// Which configurations a run builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub debug: bool,
    pub release: bool,
}

impl BuildConfiguration {
    pub const ALL: BuildConfiguration = BuildConfiguration {
        debug: true,
        release: true,
    };

    /// Selected configurations, Debug first.
    pub fn selected(self) -> Vec<Configuration> {
        let mut out = Vec::with_capacity(2);
        if self.debug {
            out.push(Configuration::Debug);
        }
        if self.release {
            out.push(Configuration::Release);
        }
        out
    }
}
