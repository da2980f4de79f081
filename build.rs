use shadow_rs::ShadowBuilder;

fn main() {
    // Build metadata consumed by lib.rs (shadow!) for --version output
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate build metadata");
}
