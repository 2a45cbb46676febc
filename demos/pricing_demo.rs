// demos/pricing_demo.rs

//! Demonstration of closed-form Black-Scholes pricing
//!
//! This example shows how to:
//! 1. Build validated option parameters
//! 2. Price calls and puts with delta and gamma
//! 3. Check put-call parity
//! 4. Handle out-of-domain inputs with typed errors

use anyhow::Result;
use bs_heatmap_lib::{
    price, BlackScholes, OptionParameters, PricingError, PricingModel, PutDeltaConvention,
};

fn main() -> Result<()> {
    println!("Black-Scholes Pricing Demo");
    println!("==========================");

    let scenarios = [
        ("ATM, r=5%", OptionParameters::new(1.0, 100.0, 100.0, 0.2, 0.05)?),
        ("ATM, r=0%", OptionParameters::new(1.0, 100.0, 100.0, 0.2, 0.0)?),
        ("ITM call, 3m", OptionParameters::new(0.25, 90.0, 100.0, 0.3, 0.02)?),
        ("OTM call, 2y", OptionParameters::new(2.0, 130.0, 100.0, 0.25, 0.03)?),
        ("Negative rate", OptionParameters::new(1.0, 100.0, 100.0, 0.2, -0.005)?),
    ];

    println!(
        "\n{:<14} {:>9} {:>9} {:>8} {:>8} {:>8} {:>12}",
        "Scenario", "Call", "Put", "Δ call", "Δ put", "Γ", "Parity err"
    );
    for (name, params) in &scenarios {
        let result = price(params);
        let parity = result.call_price
            - result.put_price
            - (params.current_price - params.strike * params.discount_factor());
        println!(
            "{:<14} {:>9.4} {:>9.4} {:>8.4} {:>8.4} {:>8.5} {:>12.2e}",
            name,
            result.call_price,
            result.put_price,
            result.call_delta,
            result.put_delta,
            result.call_gamma,
            parity
        );
    }

    println!("\nPut delta conventions for the ATM option:");
    let atm = scenarios[0].1;
    for convention in [PutDeltaConvention::Textbook, PutDeltaConvention::Complement] {
        let result = BlackScholes::with_put_delta(convention).evaluate(&atm)?;
        println!("  {:?}: {:.4}", convention, result.put_delta);
    }

    println!("\nOut-of-domain inputs:");
    match OptionParameters::new(1.0, 100.0, 100.0, 0.0, 0.05) {
        Err(PricingError::InvalidParameter { name, value, .. }) => {
            println!("  rejected {} = {}", name, value)
        }
        other => println!("  unexpected: {:?}", other),
    }

    Ok(())
}
