use super::*;

#[test]
fn rng64_is_deterministic_per_seed() {
    let mut a = Rng64::new(42);
    let mut b = Rng64::new(42);
    let mut c = Rng64::new(43);
    let xs: Vec<u64> = (0..8).map(|_| a.next_u64()).collect();
    let ys: Vec<u64> = (0..8).map(|_| b.next_u64()).collect();
    let zs: Vec<u64> = (0..8).map(|_| c.next_u64()).collect();
    assert_eq!(xs, ys);
    assert_ne!(xs, zs);
}

#[test]
fn rng64_samples_stay_in_range() {
    let mut r = Rng64::new(7);
    for _ in 0..10_000 {
        let u = r.next_f64_01();
        assert!((0.0..1.0).contains(&u));
        let v = r.uniform(-0.003, 0.003);
        assert!((-0.003..0.003).contains(&v));
        let w = r.centered(16.0);
        assert!((-8.0..8.0).contains(&w));
        assert!(r.pick_index(5) < 5);
    }
}

#[test]
fn const_random_pins_every_draw() {
    let mut r = ConstRandom(0.5);
    assert_eq!(r.centered(10.0), 0.0);
    assert_eq!(r.uniform(2.0, 4.0), 3.0);
    assert!(!r.coin());
    assert!(ConstRandom(0.75).coin());

    let mut top = ConstRandom(1.0);
    assert!(top.next_f64_01() < 1.0);
    assert_eq!(top.pick_index(5), 4);
    assert_eq!(ConstRandom(-3.0).next_f64_01(), 0.0);
    assert_eq!(ConstRandom(f64::NAN).next_f64_01(), 0.0);
}
