use std::cell::{Cell, RefCell};
use std::rc::Rc;

use fluted_glass::config::{GlassConfig, DEBOUNCE_MS};
use fluted_glass::error::{GlassError, GlassResult};
use fluted_glass::lookup::LookupTexture;
use fluted_glass::registry::{EffectRegistry, Init};
use fluted_glass::scan::{scan, Candidate};
use fluted_glass::shade::Uniforms;
use fluted_glass::surface::{Surface, SurfaceFactory, SurfaceSize};

#[derive(Default)]
struct Log {
    resizes: Vec<SurfaceSize>,
    drawn_times: Vec<f32>,
}

struct FakeSurface {
    pixels: [f32; 2],
    log: Rc<RefCell<Log>>,
}

impl Surface for FakeSurface {
    fn resize(&mut self, size: SurfaceSize) -> GlassResult<[f32; 2]> {
        self.log.borrow_mut().resizes.push(size);
        let (w, h) = size.to_pixels(1.0);
        self.pixels = [w as f32, h as f32];
        Ok(self.pixels)
    }

    fn pixel_size(&self) -> [f32; 2] {
        self.pixels
    }

    fn draw(&mut self, uniforms: &Uniforms) -> GlassResult<()> {
        self.log.borrow_mut().drawn_times.push(uniforms.time);
        Ok(())
    }
}

#[derive(Default)]
struct FakeFactory {
    created: Cell<usize>,
    fail: bool,
    log: Rc<RefCell<Log>>,
}

impl SurfaceFactory for FakeFactory {
    type Target = &'static str;
    type Surface = FakeSurface;

    fn create(
        &self,
        _target: &&'static str,
        size: SurfaceSize,
        _config: &GlassConfig,
        lookup: &LookupTexture,
    ) -> GlassResult<FakeSurface> {
        if self.fail {
            return Err(GlassError::shader("compile failed"));
        }
        assert_eq!(lookup.as_bytes().len(), 256 * 4);
        self.created.set(self.created.get() + 1);
        let (w, h) = size.to_pixels(1.0);
        Ok(FakeSurface {
            pixels: [w as f32, h as f32],
            log: Rc::clone(&self.log),
        })
    }
}

fn registry() -> EffectRegistry<&'static str, FakeSurface> {
    EffectRegistry::new()
}

#[test]
fn negligible_size_creates_no_surface() {
    let factory = FakeFactory::default();
    let mut reg = registry();
    let cfg = GlassConfig::default();

    for size in [
        SurfaceSize::new(0.0, 0.0),
        SurfaceSize::new(300.0, 1.0),
        SurfaceSize::new(1.5, 300.0),
    ] {
        let err = reg.init(&factory, &"hero", size, &cfg).err();
        assert!(matches!(err, Some(GlassError::TooSmall { .. })));
    }
    assert_eq!(factory.created.get(), 0);
    assert!(reg.is_empty());

    // Once laid out, the same element can still be picked up.
    let init = reg
        .init(&factory, &"hero", SurfaceSize::new(300.0, 200.0), &cfg)
        .unwrap();
    assert!(matches!(init, Init::Created(_)));
    assert_eq!(factory.created.get(), 1);
}

#[test]
fn second_init_is_a_no_op() {
    let factory = FakeFactory::default();
    let mut reg = registry();
    let cfg = GlassConfig::default();
    let size = SurfaceSize::new(200.0, 100.0);

    let first = reg.init(&factory, &"card", size, &cfg).unwrap().created();
    assert!(first.is_some());
    let again = reg.init(&factory, &"card", size, &cfg).unwrap();
    assert!(matches!(again, Init::Existing));

    assert_eq!(factory.created.get(), 1);
    assert_eq!(reg.len(), 1);
    assert!(Rc::ptr_eq(&first.unwrap(), &reg.get(&"card").unwrap()));

    reg.init(&factory, &"other", size, &cfg).unwrap();
    assert_eq!(reg.len(), 2);
    assert_eq!(factory.created.get(), 2);
}

#[test]
fn factory_errors_leave_target_unregistered() {
    let factory = FakeFactory {
        fail: true,
        ..FakeFactory::default()
    };
    let mut reg = registry();
    let err = reg
        .init(&factory, &"x", SurfaceSize::new(50.0, 50.0), &GlassConfig::default())
        .err();
    assert_eq!(err, Some(GlassError::shader("compile failed")));
    assert!(!reg.contains(&"x"));
}

#[test]
fn time_uniform_never_goes_backwards() {
    let factory = FakeFactory::default();
    let mut reg = registry();
    let effect = reg
        .init(&factory, &"el", SurfaceSize::new(64.0, 64.0), &GlassConfig::default())
        .unwrap()
        .created()
        .unwrap();

    for ts in [0.0, 16.7, 33.4, 30.0, f64::NAN, 50.1, 1000.0] {
        effect.borrow_mut().frame(ts).unwrap();
    }

    let log = factory.log.borrow();
    assert_eq!(log.drawn_times.len(), 7);
    assert!(log.drawn_times.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*log.drawn_times.last().unwrap(), 1.0);
    assert_eq!(effect.borrow().frames(), 7);
}

#[test]
fn resize_burst_collapses_to_final_size() {
    let factory = FakeFactory::default();
    let mut reg = registry();
    let effect = reg
        .init(&factory, &"el", SurfaceSize::new(400.0, 200.0), &GlassConfig::default())
        .unwrap()
        .created()
        .unwrap();
    assert_eq!(effect.borrow().uniforms().aspect, 2.0);

    let mut instance = effect.borrow_mut();
    instance.observe_resize(SurfaceSize::new(500.0, 200.0), 0.0);
    instance.observe_resize(SurfaceSize::new(600.0, 200.0), 40.0);
    instance.observe_resize(SurfaceSize::new(300.0, 300.0), 80.0);

    assert!(!instance.flush_resize(80.0 + DEBOUNCE_MS - 1.0).unwrap());
    assert!(factory.log.borrow().resizes.is_empty());

    assert!(instance.flush_resize(80.0 + DEBOUNCE_MS).unwrap());
    assert_eq!(factory.log.borrow().resizes, [SurfaceSize::new(300.0, 300.0)]);
    assert_eq!(instance.uniforms().aspect, 1.0);
    assert_eq!(instance.uniforms().resolution, [300.0, 300.0]);

    assert!(!instance.flush_resize(10_000.0).unwrap());
    assert_eq!(factory.log.borrow().resizes.len(), 1);
}

#[test]
fn resize_to_nothing_keeps_previous_surface() {
    let factory = FakeFactory::default();
    let mut reg = registry();
    let effect = reg
        .init(&factory, &"el", SurfaceSize::new(300.0, 100.0), &GlassConfig::default())
        .unwrap()
        .created()
        .unwrap();

    let mut instance = effect.borrow_mut();
    instance.observe_resize(SurfaceSize::new(0.0, 0.0), 0.0);
    assert!(!instance.flush_resize(DEBOUNCE_MS).unwrap());
    assert!(factory.log.borrow().resizes.is_empty());
    assert_eq!(instance.uniforms().aspect, 3.0);
}

fn candidate(target: &'static str, marker: Option<&str>, width: f64, height: f64) -> Candidate<&'static str> {
    Candidate {
        target,
        marker: marker.map(str::to_owned),
        size: SurfaceSize::new(width, height),
        config: GlassConfig::default(),
    }
}

#[test]
fn unavailable_library_creates_nothing() {
    let mut reg = registry();
    let pulled = Cell::new(0);
    let candidates = [
        candidate("a", Some(""), 300.0, 200.0),
        candidate("b", Some("true"), 300.0, 200.0),
    ]
    .into_iter()
    .inspect(|_| pulled.set(pulled.get() + 1));

    let unavailable: GlassResult<FakeFactory> =
        Err(GlassError::unavailable("WebGL2 not supported"));
    let created = scan(&mut reg, unavailable, candidates);

    assert!(created.is_empty());
    assert!(reg.is_empty());
    assert_eq!(pulled.get(), 0);
}

#[test]
fn scan_skips_disabled_and_collapsed_elements() {
    let mut reg = registry();
    let created = scan(
        &mut reg,
        Ok(FakeFactory::default()),
        [
            candidate("hero", Some(""), 300.0, 200.0),
            candidate("off", Some("false"), 300.0, 200.0),
            candidate("flat", Some("true"), 300.0, 0.0),
            candidate("card", Some("yes"), 120.0, 80.0),
        ],
    );

    let targets: Vec<_> = created.iter().map(|(target, _)| *target).collect();
    assert_eq!(targets, ["hero", "card"]);
    assert_eq!(reg.len(), 2);
    assert!(!reg.contains(&"off"));
    assert!(!reg.contains(&"flat"));
    assert!(Rc::ptr_eq(&created[0].1, &reg.get(&"hero").unwrap()));
}

#[test]
fn rescan_only_picks_up_new_elements() {
    let mut reg = registry();
    let first = scan(
        &mut reg,
        Ok(FakeFactory::default()),
        [candidate("hero", Some(""), 300.0, 200.0)],
    );
    assert_eq!(first.len(), 1);

    let second = scan(
        &mut reg,
        Ok(FakeFactory::default()),
        [
            candidate("hero", Some(""), 300.0, 200.0),
            candidate("late", Some(""), 64.0, 64.0),
        ],
    );
    let targets: Vec<_> = second.iter().map(|(target, _)| *target).collect();
    assert_eq!(targets, ["late"]);
    assert_eq!(reg.len(), 2);
}

#[test]
fn failing_factory_registers_nothing_during_scan() {
    let mut reg = registry();
    let factory = FakeFactory {
        fail: true,
        ..FakeFactory::default()
    };
    let created = scan(
        &mut reg,
        Ok(factory),
        [candidate("a", Some(""), 300.0, 200.0)],
    );
    assert!(created.is_empty());
    assert!(reg.is_empty());
}
