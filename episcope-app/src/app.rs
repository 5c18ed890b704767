use crate::Args;
use episcope_data::{Ensemble, Selection, SourceProvider};
use episcope_geometry::{CurveConfig, GeometryBuffer, SelectionGeometry};
use std::error::Error;
use std::fmt::Write as _;
use tracing::info;

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

pub fn run(args: Args) -> Result<(), Box<dyn Error>> {
    init_logging(&LoggingConfig {
        level: args.log_level.clone(),
    });

    let ensemble = Ensemble::load(&args.data)?;

    let selection = match (&args.chromosome, &args.experiment, &args.timestep) {
        (Some(c), Some(e), Some(t)) => Selection::new(c, e, t),
        (c, e, t) => {
            print!("{}", listing(&ensemble, c.as_deref(), e.as_deref(), t.as_deref())?);
            return Ok(());
        }
    };

    let config = CurveConfig {
        tension: args.tension,
    };
    let geometry = SelectionGeometry::with_config(&ensemble, selection, config)?;
    info!("Resampling {} with max distance {}", geometry.selection(), args.max_distance);
    print!("{}", report(&ensemble, &geometry, args.max_distance)?);
    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level)),
        )
        .with_target(false)
        .init();
}

/// Experiments, timesteps, chromosomes and track names, narrowed by any
/// partial selection given on the command line.
fn listing<P: SourceProvider + ?Sized>(
    provider: &P,
    chromosome: Option<&str>,
    experiment: Option<&str>,
    timestep: Option<&str>,
) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    for exp in provider.experiment_names(chromosome, timestep) {
        if experiment.is_some_and(|e| e != exp) {
            continue;
        }
        writeln!(out, "{exp}")?;
        for ts in provider.timestep_names(chromosome, Some(&exp)) {
            if timestep.is_some_and(|t| t != ts) {
                continue;
            }
            writeln!(out, "  {ts}")?;
            for chr in provider.chromosome_names(Some(&exp), Some(&ts)) {
                if chromosome.is_some_and(|c| c != chr) {
                    continue;
                }
                let peaks = provider.peak_track_names(&chr, &exp, &ts);
                let points = provider.point_track_names(&chr, &exp, &ts);
                writeln!(
                    out,
                    "    {chr}  peak: [{}]  point: [{}]",
                    join(&peaks),
                    join(&points)
                )?;
            }
        }
    }
    Ok(out)
}

fn report<P: SourceProvider + ?Sized>(
    provider: &P,
    geometry: &SelectionGeometry<'_, P>,
    max_distance: i64,
) -> Result<String, Box<dyn Error>> {
    let s = geometry.selection();
    let mut out = String::new();
    writeln!(out, "{s}")?;
    writeln!(out, "  {}", describe("structure", &geometry.structure(max_distance)?))?;

    for name in provider.peak_track_names(&s.chromosome, &s.experiment, &s.timestep) {
        let buffer = geometry.peak_track(&name, max_distance)?;
        writeln!(out, "  {}", describe(&format!("peak {name}"), &buffer))?;
    }
    for name in provider.point_track_names(&s.chromosome, &s.experiment, &s.timestep) {
        let buffer = geometry.point_track(&name, max_distance)?;
        writeln!(out, "  {}", describe(&format!("point {name}"), &buffer))?;
    }
    Ok(out)
}

/// One summary line for a buffer.
fn describe(label: &str, buffer: &GeometryBuffer) -> String {
    let mut line = format!(
        "{label}: {} points, {} lines",
        buffer.len(),
        buffer.line_count()
    );
    if let Some((lo, hi)) = buffer.scalar_range() {
        let _ = write!(line, ", scalars [{lo}, {hi}]");
    }
    if let Some(bounds) = buffer.bounds() {
        let _ = write!(
            line,
            ", bounds {:?}..{:?} (radius {:.3})",
            bounds.min.to_array(),
            bounds.max.to_array(),
            bounds.radius
        );
    }
    line
}

fn join(names: &std::collections::BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
