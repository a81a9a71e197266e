use approx::assert_relative_eq;
use projectile_simulation::{
    errors::SimulationError, Environment, Horizon, LaunchConditions, PhysicalParameters,
    Projectile, Recorder, RunConfig, Sample, TableWriter, Telemetry, Termination,
    TerminationPolicy, TrajectoryIntegrator, Vector3D,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

// Helper function to build the reference ball with a given environment and launch
fn create_params(environment: Environment, launch: LaunchConditions) -> PhysicalParameters {
    PhysicalParameters::new(Projectile::default(), environment, launch)
}

fn collect_samples(integrator: &TrajectoryIntegrator) -> Vec<Sample> {
    integrator
        .trajectory()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn random_launch(rng: &mut StdRng) -> LaunchConditions {
    LaunchConditions::new(
        rng.gen_range(1.0..50.0),
        rng.gen_range(5.0..85.0),
        Vector3D::zero(),
    )
}

#[test]
fn test_reference_scenario() {
    println!("INTEGRATION TEST: 10 m/s ball at 60° from co-latitude 45°");

    let integrator =
        TrajectoryIntegrator::new(PhysicalParameters::default(), RunConfig::default()).unwrap();
    let mut recorder = Recorder::new();
    let result = integrator.run(&mut recorder).unwrap();
    let samples = &recorder.samples;

    assert_eq!(samples[0].t, 0.0);
    assert!(samples.windows(2).all(|pair| pair[1].t > pair[0].t));
    assert!(samples.iter().all(|s| s.t < 5.0));

    let range = result.range().expect("the ball lands within 5 s");
    println!("Range: {:.4} m after {} steps", range, result.steps);
    assert!(range > 5.0 && range < 15.0, "range = {}", range);

    // Drag shortens the flight compared with the drag-free parabola.
    let drag_free_range = 100.0 * (120f64).to_radians().sin() / result.effective_gravity;
    assert!(range < drag_free_range);

    assert_relative_eq!(result.effective_gravity, 9.797486725877128, epsilon = 1e-9);
    assert_relative_eq!(result.terminal_velocity.unwrap(), 31.3009, epsilon = 1e-4);

    // The ball lands near t = 1.7 s and keeps falling, so the 1 m depth
    // limit ends the run long before the 5 s horizon.
    assert_eq!(result.termination, Termination::DepthLimitReached);
    assert!(result.final_state.time < 2.5);
}

#[test]
fn test_drag_free_non_rotating_matches_parabola() {
    let params = create_params(
        Environment::default().without_drag().without_rotation(),
        LaunchConditions::default(),
    );
    let config = RunConfig::new(0.005, Horizon::flight_time_multiple());
    let integrator = TrajectoryIntegrator::new(params, config).unwrap();
    let samples = collect_samples(&integrator);

    assert!(samples.len() > 300);
    for sample in &samples {
        assert_relative_eq!(
            sample.x,
            sample.x_no_resist,
            epsilon = 1e-9,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            sample.z,
            sample.z_no_resist,
            epsilon = 1e-9,
            max_relative = 1e-6
        );
        assert_eq!(sample.y, 0.0);
    }
}

#[test]
fn test_no_rotation_keeps_motion_in_launch_plane() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..10 {
        let params = create_params(
            Environment::default().without_rotation(),
            random_launch(&mut rng),
        );
        let config = RunConfig::new(0.005, Horizon::flight_time_multiple());
        let integrator = TrajectoryIntegrator::new(params, config).unwrap();

        let mut trajectory = integrator.trajectory();
        while let Some(sample) = trajectory.next() {
            let sample = sample.unwrap();
            assert_eq!(sample.y, 0.0);
            assert_eq!(trajectory.state().velocity.y, 0.0);
        }
        assert!(trajectory.termination().is_some());
    }
}

#[test]
fn test_dropped_ball_approaches_terminal_velocity() {
    let params = create_params(
        Environment::default().without_rotation(),
        LaunchConditions::new(0.0, 90.0, Vector3D::zero()),
    );
    let config = RunConfig::new(0.01, Horizon::Fixed(40.0))
        .with_termination(TerminationPolicy::new(0.1, f64::INFINITY));
    let integrator = TrajectoryIntegrator::new(params, config).unwrap();
    let terminal_velocity = integrator.get_derived().terminal_velocity.unwrap();

    let mut trajectory = integrator.trajectory();
    let mut previous_speed = 0.0;
    while let Some(sample) = trajectory.next() {
        sample.unwrap();
        let vz = trajectory.state().velocity.z;
        assert!(vz <= 0.0);
        assert!(-vz <= terminal_velocity * (1.0 + 1e-9), "vz = {}", vz);
        assert!(-vz >= previous_speed - 1e-9, "speed must not decrease");
        previous_speed = -vz;
    }

    let summary = trajectory.summary().unwrap();
    assert_eq!(summary.termination, Termination::HorizonReached);
    assert_relative_eq!(
        summary.final_state.velocity.z,
        -terminal_velocity,
        max_relative = 1e-6
    );
    // Straight down from x = 0: nothing to measure a range from.
    assert_eq!(summary.range(), None);
}

#[test]
fn test_halving_the_step_converges() {
    let sample_at_one_second = |time_step: f64| {
        let config = RunConfig::new(time_step, Horizon::Fixed(1.5));
        let integrator = TrajectoryIntegrator::new(PhysicalParameters::default(), config).unwrap();
        let samples = collect_samples(&integrator);
        let sample = samples[(1.0 / time_step).round() as usize];
        assert_relative_eq!(sample.t, 1.0, epsilon = 1e-12);
        sample
    };

    let coarse = sample_at_one_second(0.01);
    let medium = sample_at_one_second(0.005);
    let fine = sample_at_one_second(0.0025);

    let first_change = (coarse.x - medium.x).hypot(coarse.z - medium.z);
    let second_change = (medium.x - fine.x).hypot(medium.z - fine.z);
    println!(
        "Step halving changes: {:.3e} m then {:.3e} m",
        first_change, second_change
    );

    assert!(first_change < 1e-2);
    assert!(second_change < 0.75 * first_change);
}

#[test]
fn test_identical_parameters_replay_identically() {
    let mut rng = StdRng::seed_from_u64(2013);

    for _ in 0..5 {
        let environment = Environment::new(
            9.8,
            7.272e-5,
            1.2,
            rng.gen_range(0.0..1.0),
            rng.gen_range(0.0..180.0),
        );
        let params = create_params(environment, random_launch(&mut rng));
        let config = RunConfig::new(0.005, Horizon::flight_time_multiple());

        let first = TrajectoryIntegrator::new(params, config).unwrap();
        let second = TrajectoryIntegrator::new(params, config).unwrap();

        let mut first_recorder = Recorder::new();
        let mut second_recorder = Recorder::new();
        let first_result = first.run(&mut first_recorder).unwrap();
        let second_result = second.run(&mut second_recorder).unwrap();

        assert_eq!(first_recorder.samples, second_recorder.samples);
        assert_eq!(first_result, second_result);
    }
}

#[test]
fn test_downward_launch_hits_depth_limit() {
    let params = PhysicalParameters::new(
        Projectile::new(5.0, 0.1),
        Environment::new(9.8, 7.272e-5, 1.2, 0.01, 45.0),
        LaunchConditions::new(10.0, -80.0, Vector3D::zero()),
    );
    let config = RunConfig::new(0.005, Horizon::Fixed(10.0));
    let integrator = TrajectoryIntegrator::new(params, config).unwrap();
    let result = integrator.run(&mut Recorder::new()).unwrap();

    assert_eq!(result.termination, Termination::DepthLimitReached);
    assert!(result.final_state.time < 0.5);
    assert!(result.final_state.position.z < -1.0);
}

#[test]
fn test_rejects_invalid_parameters() {
    let cases = [
        Projectile::new(0.0, 0.1),
        Projectile::new(-0.25, 0.1),
        Projectile::new(0.25, 0.0),
        Projectile::new(0.25, -0.1),
    ];
    for projectile in cases {
        let params = PhysicalParameters::new(
            projectile,
            Environment::default(),
            LaunchConditions::default(),
        );
        let err = TrajectoryIntegrator::new(params, RunConfig::default()).unwrap_err();
        assert!(matches!(err, SimulationError::DomainError(_)), "{:?}", err);
    }

    for config in [
        RunConfig::new(0.0, Horizon::Fixed(5.0)),
        RunConfig::new(0.005, Horizon::Fixed(-1.0)),
        RunConfig::new(0.005, Horizon::FlightTimeMultiple(0.0)),
    ] {
        let err = TrajectoryIntegrator::new(PhysicalParameters::default(), config).unwrap_err();
        assert!(matches!(err, SimulationError::DomainError(_)), "{:?}", err);
    }
}

#[test]
fn test_table_and_telemetry_see_the_same_stream() {
    let integrator =
        TrajectoryIntegrator::new(PhysicalParameters::default(), RunConfig::default()).unwrap();
    let mut table = TableWriter::new(Vec::new());
    let mut telemetry = Telemetry::new();

    let result = integrator.run(&mut (&mut table, &mut telemetry)).unwrap();
    let text = String::from_utf8(table.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), telemetry.get_samples());
    assert_eq!(lines.len() as u64, result.steps + 1);
    assert_eq!(
        lines[0],
        "\t 0.0000   0.0000   0.0000   0.0000   0.0000    0.0000"
    );
    for line in &lines {
        let fields: Vec<f64> = line
            .split_whitespace()
            .map(|field| field.parse().unwrap())
            .collect();
        assert_eq!(fields.len(), 6);
    }

    let apex = telemetry.get_max_height().unwrap();
    assert!(apex > 3.0 && apex < 3.83, "apex = {}", apex);

    let report = telemetry.report(&result, 9.8);
    assert!(report.contains("Termination          : depth limit reached"));
}
