/// Terminal front end for native builds.
///
/// Reads the dataset relative to the working directory and prints one view per
/// command. An optional single argument names a configuration file.
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::io::BufRead;
    use std::process::ExitCode;

    use specview::data::{DescriptorLoader, FsSource, load_manifests};
    use specview::render::{describe_local_image, render_text};
    use specview::{Viewer, ViewerAction, ViewerConfig};

    let config_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    let config = match ViewerConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Cannot determine working directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let source = FsSource::new(&root);
    let manifests = match pollster::block_on(load_manifests(&source, &config.data_dir)) {
        Ok(manifests) => manifests,
        Err(e) => {
            log::error!("Failed to load dataset: {}", e);
            eprintln!("Failed to load dataset: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut viewer = Viewer::new(manifests, &config);
    let loader = DescriptorLoader::new(source.clone(), config.descriptor_dir.clone());

    let render = |viewer: &Viewer| {
        let Some(request) = viewer.render_request() else {
            println!("No images in dataset.");
            return;
        };
        let descriptors = pollster::block_on(request.load_descriptors(&loader));
        if let Some(vm) = viewer.view_model(&descriptors) {
            print!("{}", render_text(&vm));
            if config.image_base_url.is_empty() {
                if let Some(size) = describe_local_image(&source.resolve(&vm.image_src)) {
                    println!("  size: {}", size);
                }
            }
        }
    };

    println!("Commands: n/p, 1-9 (page slot), 0 or + (next page), g <n>, s (shuffle), q");
    render(&viewer);

    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::error!("Failed to read input: {}", e);
                return ExitCode::FAILURE;
            }
        };
        let trimmed = line.trim();
        if trimmed == "q" || trimmed == "quit" {
            break;
        }
        match ViewerAction::from_command(trimmed) {
            Some(action) => {
                viewer.dispatch(action);
                render(&viewer);
            }
            None if trimmed.is_empty() => {}
            None => println!("Unknown command: {}", trimmed),
        }
    }

    ExitCode::SUCCESS
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
