//! Option declarations for the optchain demo application.
//!
//! Every option is declared once, here, and registered with the registry
//! passed in by `main`. Declaration order is the order the flags appear in
//! `--help`.
//!
//! | Option    | Flag              | Env var           | Default  |
//! |-----------|-------------------|-------------------|----------|
//! | `name`    | `--name`, `-n`    | `OPTCHAIN_NAME`   | `world`  |
//! | `repeat`  | `--repeat`        | `OPTCHAIN_REPEAT` | `1`      |
//! | `shout`   | `--shout`, `-s`   | `SHOUT`           | `false`  |
//! | `color`   | `--color`         | `OPTCHAIN_COLOR`  | `yellow` |
//! | `out-dir` | `--out-dir`       | none              | none     |
//! | `token`   | none              | `OPTCHAIN_TOKEN`  | none     |
//! | `report`  | `--report`        | none              | `false`  |

use optchain::{FlagOpt, Opt, OptError, Registry};

pub struct DemoOptions {
    pub name: Opt<String>,
    pub repeat: Opt<i64>,
    pub shout: Opt<bool>,
    pub color: Opt<String>,
    pub out_dir: Opt<String>,
    pub token: Opt<String>,
    pub report: Opt<bool>,
}

impl DemoOptions {
    pub fn declare(registry: &Registry) -> Result<Self, OptError> {
        let name = optchain::text("name")
            .flag_p("name", 'n', &[])
            .env("OPTCHAIN_NAME")
            .default("world")
            .usage("Who to greet")
            .build(registry)?;

        let repeat = optchain::int("repeat")
            .flag("repeat", &[])
            .env("OPTCHAIN_REPEAT")
            .default("1")
            .usage("How many greetings to print")
            .build(registry)?;

        let shout = optchain::boolean("shout")
            .flag_p("shout", 's', &[])
            .env_from_key()
            .default("false")
            .usage("Upper-case the greeting (true/false)")
            .build(registry)?;

        let color = optchain::text("color")
            .env("OPTCHAIN_COLOR")
            .flag("color", &[FlagOpt::Persistent])
            .default("yellow")
            .usage("Greeting color (red, green, yellow, blue)")
            .build(registry)?;

        let out_dir = optchain::text("out-dir")
            .flag("out-dir", &[FlagOpt::Dir])
            .usage("Also write the greeting to DIR/greeting.txt")
            .build(registry)?;

        let token = optchain::text("token").env("OPTCHAIN_TOKEN").build(registry)?;

        let report = optchain::boolean("report")
            .flag("report", &[])
            .default("false")
            .usage("Print every option and the source that supplied it")
            .build(registry)?;

        Ok(Self {
            name,
            repeat,
            shout,
            color,
            out_dir,
            token,
            report,
        })
    }
}
