use argh::FromArgs;
use arpose_mat44::{checked, ops, CameraPose, Matrix44, Tolerance};

/// Rotates a model-view pose and prints the camera outputs sent to the host application
#[derive(Debug, FromArgs)]
struct Args {
    /// rotation angle in degrees
    #[argh(option, short = 'a', default = "90.0")]
    angle: f32,

    /// rotation axis as `x,y,z`
    #[argh(option, default = "[0.0, 0.0, 1.0]", from_str_fn(parse_vec3))]
    axis: [f32; 3],

    /// translation of the initial pose as `x,y,z`
    #[argh(option, short = 't', default = "[0.0, 0.0, -5.0]", from_str_fn(parse_vec3))]
    translation: [f32; 3],

    /// path to a JSON file with numeric tolerances
    #[argh(option)]
    tolerance: Option<std::path::PathBuf>,

    /// use the inverse-transpose of the model-view to extract the camera
    #[argh(switch, short = 'i')]
    inverse: bool,
}

fn parse_vec3(value: &str) -> Result<[f32; 3], String> {
    let parts = value
        .split(',')
        .map(|s| s.trim().parse::<f32>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(format!("expected three comma separated values, got `{value}`")),
    }
}

fn print_matrix(name: &str, m: &Matrix44) {
    println!("{name}:");
    for r in 0..4 {
        let [a, b, c, d] = m.row(r);
        println!("  [{a:>9.4} {b:>9.4} {c:>9.4} {d:>9.4}]");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let tol = match &args.tolerance {
        Some(path) => serde_json::from_str::<Tolerance>(&std::fs::read_to_string(path)?)?,
        None => Tolerance::default(),
    };
    log::info!("using tolerances: {tol:?}");

    let [tx, ty, tz] = args.translation;
    let mut model_view = ops::translation_matrix(tx, ty, tz);
    print_matrix("model-view", &model_view);

    let [x, y, z] = args.axis;
    checked::try_rotate_pose(args.angle, x, y, z, &mut model_view, &tol)?;
    print_matrix("rotated model-view", &model_view);

    let camera = if args.inverse {
        CameraPose::from_inverse_model_view(&model_view, &tol)?
    } else {
        CameraPose::from_model_view(&model_view)
    };

    if !camera.is_finite() {
        log::warn!("camera pose contains non-finite values, not forwarding");
        return Ok(());
    }

    let [px, py, pz] = camera.position;
    println!("camera position: ({px:.4}, {py:.4}, {pz:.4})");
    println!("camera orientation: {:?}", camera.orientation_scalars());

    Ok(())
}
