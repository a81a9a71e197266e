use std::io;
use std::path::PathBuf;

use clap::Parser;
use projectile_simulation::*;

/// Trajectory of a ball under gravity, quadratic drag, buoyancy and the
/// Coriolis force. The launch is along the East-West direction.
#[derive(Parser, Debug)]
#[command(name = "projectile")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Diameter of the ball (m)
    #[arg(short = 'd', long, default_value_t = PROJECTILE_DIAMETER)]
    diameter: f64,

    /// Mass of the ball (kg)
    #[arg(short = 'm', long, default_value_t = PROJECTILE_MASS)]
    mass: f64,

    /// Launch speed (m/s)
    #[arg(short = 'v', long, default_value_t = LAUNCH_SPEED)]
    speed: f64,

    /// Launch angle above the horizontal (degrees)
    #[arg(short = 'a', long, default_value_t = LAUNCH_ANGLE_DEG, allow_hyphen_values = true)]
    angle: f64,

    /// Co-latitude of the launch site (degrees)
    #[arg(long, default_value_t = CO_LATITUDE_DEG)]
    co_latitude: f64,

    /// Surface gravity (m/s²)
    #[arg(long, default_value_t = GRAVITY)]
    gravity: f64,

    /// Angular rate of the Earth (rad/s)
    #[arg(long, default_value_t = EARTH_ANGULAR_RATE)]
    omega: f64,

    /// Quadratic drag coefficient gamma, c = gamma·D² (kg/m³)
    #[arg(long, default_value_t = DRAG_GAMMA)]
    gamma: f64,

    /// Air density (kg/m³)
    #[arg(long, default_value_t = AIR_DENSITY)]
    air_density: f64,

    /// Launch position x, y, z (m)
    #[arg(
        long,
        num_args = 3,
        value_names = ["X", "Y", "Z"],
        default_values_t = [0.0, 0.0, 0.0],
        allow_hyphen_values = true
    )]
    origin: Vec<f64>,

    /// Integration step (s)
    #[arg(long, default_value_t = TIME_STEP)]
    time_step: f64,

    /// Integration horizon (s)
    #[arg(long, default_value_t = MAX_SIMULATION_TIME, conflicts_with = "auto_horizon")]
    t_max: f64,

    /// Derive the horizon from the drag-free time of flight instead of --t-max
    #[arg(long)]
    auto_horizon: bool,

    /// Horizon as a multiple of the drag-free time of flight (with --auto-horizon)
    #[arg(long, default_value_t = FLIGHT_TIME_MULTIPLE)]
    flight_time_multiple: f64,

    /// Half-width of the z≈0 band used to detect the range (m)
    #[arg(long, default_value_t = RANGE_TOLERANCE)]
    range_tolerance: f64,

    /// Stop once the ball is this far below the launch plane (m)
    #[arg(long, default_value_t = DEPTH_LIMIT)]
    depth_limit: f64,

    /// Trajectory table for plotting
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Do not echo the table to stdout
    #[arg(short = 'q', long)]
    quiet: bool,
}

impl Cli {
    fn parameters(&self) -> PhysicalParameters {
        let origin = match self.origin.as_slice() {
            [x, y, z] => Vector3D::new(*x, *y, *z),
            _ => Vector3D::zero(),
        };
        PhysicalParameters::new(
            Projectile::new(self.mass, self.diameter),
            Environment::new(
                self.gravity,
                self.omega,
                self.air_density,
                self.gamma,
                self.co_latitude,
            ),
            LaunchConditions::new(self.speed, self.angle, origin),
        )
    }

    fn run_config(&self) -> RunConfig {
        let horizon = if self.auto_horizon {
            Horizon::FlightTimeMultiple(self.flight_time_multiple)
        } else {
            Horizon::Fixed(self.t_max)
        };
        RunConfig::new(self.time_step, horizon).with_termination(TerminationPolicy::new(
            self.range_tolerance,
            self.depth_limit,
        ))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let params = cli.parameters();
    let integrator = TrajectoryIntegrator::new(params, cli.run_config())?;

    log::info!(
        "Integrating with h = {} s up to t = {:.4} s",
        integrator.get_time_step(),
        integrator.get_t_max()
    );

    let table = TableWriter::create(&cli.output)?;
    let echo = (!cli.quiet).then(|| TableWriter::new(io::stdout().lock()));
    let mut telemetry = Telemetry::new();

    let result = integrator.run(&mut (table, (echo, &mut telemetry)))?;

    log::info!("Wrote {} samples to {:?}", telemetry.get_samples(), cli.output);
    println!();
    println!("{}", telemetry.report(&result, params.environment.gravity));

    Ok(())
}
