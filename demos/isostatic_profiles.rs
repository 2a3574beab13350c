/// Ice-cap profile over a loaded bed for three mantle densities.

use colored::Colorize;
use glacier_dynamics::constants::DEFAULT_PROFILE_RESOLUTION_M;
use glacier_dynamics::sweep::mantle_density_sweep;
use glacier_dynamics::{Glacier, GlacierConfig, IsostaticConvention};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let base = Glacier::with_defaults(GlacierConfig::new(100_000.0, 0.0, 0.0))?;

    let unloaded = base.profile(DEFAULT_PROFILE_RESOLUTION_M)?;
    println!("{}", "🧊 Ice cap, 100 km, rigid bed".bold());
    println!("   Maximum surface height: {:.2} m", unloaded.max_surface_height());

    for convention in [IsostaticConvention::Amplified, IsostaticConvention::Attenuated] {
        let base = base.with_config(base.config().clone().with_convention(convention))?;
        println!(
            "\n{}",
            format!("🏔️  Loaded bed ({} convention)", convention.as_str()).bold()
        );
        for profile in mantle_density_sweep(&base, &[3410.0, 3350.0, 3270.0], DEFAULT_PROFILE_RESOLUTION_M)? {
            let section = &profile.section;
            println!("\n   Stats for density {}:", profile.mantle_density.to_string().cyan());
            println!("     Maximum surface height: {:.2} m", section.max_surface_height());
            println!("     Minimum bed depth:      {:.2} m", section.min_bed_depth());
            println!("     Maximum thickness:      {:.2} m", section.max_thickness());
        }
    }
    Ok(())
}
