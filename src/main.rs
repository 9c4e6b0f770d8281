//! Host-side helper.
//!
//! `preview` renders a still of the effect on the CPU into a PNG.
//! `serve` builds the WASM bundle into `static/pkg` and serves `static/`
//! locally so the demo page can be opened in a browser.

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    host::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::path::PathBuf;
    use std::process::{Command, Stdio};

    use anyhow::{bail, Context};
    use clap::{Parser, Subcommand};
    use log::{info, warn};

    use fluted_glass::color::Rgb;
    use fluted_glass::config::{self, GlassConfig, ShaderMode};
    use fluted_glass::lookup::LookupTexture;
    use fluted_glass::shade::{shade, Uniforms};

    #[derive(Parser, Debug)]
    #[command(name = "fluted-glass", about = "Fluted glass effect tooling")]
    struct Cli {
        #[command(subcommand)]
        command: Cmd,
    }

    #[derive(Subcommand, Debug)]
    enum Cmd {
        /// Render one frame to a PNG using the CPU shading path.
        Preview(PreviewArgs),
        /// Build the WASM bundle and serve the demo site.
        Serve {
            #[arg(long, default_value_t = 8000)]
            port: u16,
            /// Serve whatever is already in static/pkg.
            #[arg(long)]
            skip_build: bool,
        },
    }

    #[derive(clap::Args, Debug)]
    struct PreviewArgs {
        #[arg(short, long, default_value = "glass.png")]
        out: PathBuf,
        #[arg(long, default_value_t = 640)]
        width: u32,
        #[arg(long, default_value_t = 360)]
        height: u32,
        /// Animation time in seconds.
        #[arg(long, default_value_t = 0.0)]
        time: f32,
        #[arg(long, default_value = "#741de2")]
        color_one: String,
        #[arg(long, default_value = "#77bebb")]
        color_two: String,
        #[arg(long, default_value_t = config::DEFAULT_COLUMNS)]
        columns: i64,
        #[arg(long, default_value_t = config::DEFAULT_DISTORTION)]
        distortion: f32,
        #[arg(long, default_value = "glass")]
        mode: String,
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        match Cli::parse().command {
            Cmd::Preview(args) => preview(&args),
            Cmd::Serve { port, skip_build } => serve(port, skip_build),
        }
    }

    fn preview(args: &PreviewArgs) -> anyhow::Result<()> {
        if args.width == 0 || args.height == 0 {
            bail!("preview size must be non-zero");
        }
        let mode = ShaderMode::from_id(&args.mode)
            .with_context(|| format!("unknown mode {:?} (expected glass or pulse)", args.mode))?;
        let cfg = GlassConfig {
            color_one: Rgb::parse(&args.color_one)
                .with_context(|| format!("bad color {:?}", args.color_one))?,
            color_two: Rgb::parse(&args.color_two)
                .with_context(|| format!("bad color {:?}", args.color_two))?,
            columns: args.columns,
            distortion: args.distortion,
            mode,
        };

        let lookup = LookupTexture::new(cfg.columns);
        let mut uniforms = Uniforms::from_config(&cfg, [args.width as f32, args.height as f32]);
        uniforms.time = args.time;

        let img = image::RgbaImage::from_fn(args.width, args.height, |x, y| {
            // Pixel centers; v grows upwards like gl_FragCoord.
            let u = (x as f32 + 0.5) / args.width as f32;
            let v = 1.0 - (y as f32 + 0.5) / args.height as f32;
            let px = shade([u, v], &uniforms, &lookup);
            image::Rgba(px.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
        });
        img.save(&args.out)
            .with_context(|| format!("writing {}", args.out.display()))?;
        info!(
            "wrote {} ({}x{}, t={}s, {} columns)",
            args.out.display(),
            args.width,
            args.height,
            args.time,
            lookup.columns()
        );
        Ok(())
    }

    fn serve(port: u16, skip_build: bool) -> anyhow::Result<()> {
        if !skip_build {
            info!("building WASM pkg");
            match Command::new("wasm-pack")
                .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
                .status()
            {
                Ok(st) if st.success() => {}
                Ok(st) => bail!("wasm-pack failed ({st}); is the wasm32 target installed?"),
                Err(_) => warn!("wasm-pack not found in PATH; serving existing static/pkg"),
            }
        }

        info!("serving static/ at http://127.0.0.1:{port}");
        let status = Command::new("python3")
            .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
            .stdout(Stdio::null())
            .status()
            .context("failed to start python3 http.server")?;
        if !status.success() {
            bail!("http server exited with {status}");
        }
        Ok(())
    }
}
