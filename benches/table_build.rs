use criterion::{black_box, criterion_group, criterion_main, Criterion};
extern crate rydberg_spectra as lib;

use lib::builder::TransitionTableBuilder;
use lib::enumerate::{StateSpace, SublevelOption};
use lib::error::LookupError;
use lib::provider::AtomicDataProvider;
use lib::selection::Polarization;
use lib::state::{Level, QuantumState};

/// Hydrogen-like atom with a constant dipole, cheap enough that the benchmark measures the
/// enumeration, selection and memoization overhead.
struct Hydrogenic;

impl AtomicDataProvider for Hydrogenic {
    fn energy(&self, level: Level) -> Result<f64, LookupError> {
        let n = f64::from(level.n());
        Ok(-13.6 / (n * n) + 1e-6 * level.j())
    }

    fn dipole_matrix_element(
        &self,
        _a: &QuantumState,
        _b: &QuantumState,
        _q: Polarization,
    ) -> Result<f64, LookupError> {
        Ok(1.0)
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let space = StateSpace::new(6, 70, 1, SublevelOption::Enabled);

    c.bench_function("enumerate n=6..70 lmax=1", |b| {
        b.iter(|| black_box(space.states().count()))
    });

    let builder = TransitionTableBuilder::new(StateSpace::new(6, 40, 1, SublevelOption::Enabled));
    c.bench_function("build table n=6..40 lmax=1", |b| {
        b.iter(|| black_box(builder.build(Hydrogenic).map(|table| table.len())))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
