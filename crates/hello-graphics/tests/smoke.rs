use std::process::Command;

fn display_available() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY", "WAYLAND_SOCKET"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

// Every failure path (no display, no adapter, missing shaders) must end in
// status 1 with a message, so the exit status holds on headless machines too.
#[test]
fn missing_shaders_exit_with_failure() {
    let missing = std::env::temp_dir().join("hello-graphics-smoke-no-shaders");

    let output = Command::new(env!("CARGO_BIN_EXE_hello-graphics"))
        .env("HELLO_GRAPHICS_SHADER_DIR", &missing)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to spawn hello-graphics");

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.trim().is_empty(), "no error message on stderr");

    // With a display the run gets past the event loop; unless the machine has
    // no usable GPU, it has to stop at the first shader file.
    let no_gpu = stderr.contains("could not find a suitable GPU adapter")
        || stderr.contains("could not create GPU device")
        || stderr.contains("could not claim window for GPU device");
    if display_available() && !no_gpu {
        assert!(stderr.contains("triangle.vert.spv"), "unexpected error: {stderr}");
    }
}

#[test]
fn fatal_error_is_printed_once() {
    let missing = std::env::temp_dir().join("hello-graphics-smoke-no-shaders");

    let output = Command::new(env!("CARGO_BIN_EXE_hello-graphics"))
        .env("HELLO_GRAPHICS_SHADER_DIR", &missing)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn hello-graphics");

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    let message = stderr.lines().last().unwrap_or_default().trim();
    assert!(!message.is_empty(), "no error message on stderr");
    assert_eq!(stderr.matches(message).count(), 1, "error repeated: {stderr}");
}
