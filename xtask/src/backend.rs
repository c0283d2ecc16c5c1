//! Native build backends and the commands they are driven with.

use std::path::Path;

use crate::configuration::Configuration;
use crate::exec::CommandSpec;
use crate::toolchain::Toolchain;
use crate::util::tools_env::ToolEnv;

pub const SOLUTION: &str = "gameplay.sln";
pub const XCODE_WORKSPACE: &str = "gameplay.xcworkspace";
pub const XCODE_SCHEME: &str = "gameplay";
const MSBUILD_PLATFORM: &str = "x64";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    MsBuild,
    Make,
    Xcode,
}

impl Backend {
    pub fn for_toolchain(toolchain: &Toolchain) -> Option<Self> {
        match toolchain {
            Toolchain::Vs2019 => Some(Backend::MsBuild),
            Toolchain::Gmake => Some(Backend::Make),
            Toolchain::Xcode4 => Some(Backend::Xcode),
            Toolchain::Unsupported(_) => None,
        }
    }

    /// MSBuild only works inside a developer environment set up by `vcvars64.bat`.
    pub fn needs_msvc_env(self) -> bool {
        self == Backend::MsBuild
    }

    pub fn program(self) -> &'static str {
        match self {
            Backend::MsBuild => "msbuild",
            Backend::Make => "make",
            Backend::Xcode => "xcodebuild",
        }
    }

    pub fn clean_command(self, project_dir: &Path, env: &ToolEnv) -> CommandSpec {
        let cmd = CommandSpec::new(self.program());
        let cmd = match self {
            Backend::MsBuild => cmd.args([SOLUTION, "/t:Clean"]),
            Backend::Make => cmd.arg("clean"),
            Backend::Xcode => cmd
                .args(["-workspace", XCODE_WORKSPACE, "-scheme", XCODE_SCHEME])
                .arg("clean"),
        };
        cmd.current_dir(project_dir).env(env)
    }

    pub fn build_command(
        self,
        project_dir: &Path,
        configuration: Configuration,
        env: &ToolEnv,
    ) -> CommandSpec {
        let cmd = CommandSpec::new(self.program());
        let cmd = match self {
            Backend::MsBuild => cmd.args([
                SOLUTION.to_string(),
                format!("/p:Configuration={}", configuration.name()),
                format!("/p:Platform={MSBUILD_PLATFORM}"),
            ]),
            Backend::Make => cmd.arg(format!("config={}", configuration.make_config())),
            Backend::Xcode => cmd
                .args(["-workspace", XCODE_WORKSPACE, "-scheme", XCODE_SCHEME])
                .args(["-configuration", configuration.name(), "build"]),
        };
        cmd.current_dir(project_dir).env(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(cmd: &CommandSpec) -> String {
        cmd.to_string()
    }

    #[test]
    fn make_commands() {
        let env = ToolEnv::default();
        let dir = Path::new("/g/_compiler/gmake");
        assert_eq!(line(&Backend::Make.clean_command(dir, &env)), "make clean");
        assert_eq!(
            line(&Backend::Make.build_command(dir, Configuration::Debug, &env)),
            "make config=debug_x86_64"
        );
        assert_eq!(
            Backend::Make.build_command(dir, Configuration::Release, &env).cwd.as_deref(),
            Some(dir)
        );
    }

    #[test]
    fn msbuild_commands() {
        let env = ToolEnv::from_pairs([("VSINSTALLDIR", "C:\\VS")]);
        let dir = Path::new("/g/_compiler/vs2019");
        let clean = Backend::MsBuild.clean_command(dir, &env);
        assert_eq!(line(&clean), "msbuild gameplay.sln /t:Clean");
        assert_eq!(clean.env, env);
        assert_eq!(
            line(&Backend::MsBuild.build_command(dir, Configuration::Release, &env)),
            "msbuild gameplay.sln /p:Configuration=Release /p:Platform=x64"
        );
    }

    #[test]
    fn xcode_commands() {
        let env = ToolEnv::default();
        let dir = Path::new("/g/_compiler/xcode4");
        assert_eq!(
            line(&Backend::Xcode.clean_command(dir, &env)),
            "xcodebuild -workspace gameplay.xcworkspace -scheme gameplay clean"
        );
        assert_eq!(
            line(&Backend::Xcode.build_command(dir, Configuration::Debug, &env)),
            "xcodebuild -workspace gameplay.xcworkspace -scheme gameplay -configuration Debug build"
        );
    }

    #[test]
    fn only_known_toolchains_have_backends() {
        assert_eq!(Backend::for_toolchain(&Toolchain::Vs2019), Some(Backend::MsBuild));
        assert_eq!(Backend::for_toolchain(&Toolchain::Unsupported("ninja".into())), None);
        assert!(Backend::MsBuild.needs_msvc_env());
        assert!(!Backend::Make.needs_msvc_env());
    }
}
