use super::*;
use std::thread::sleep;
use std::time::Duration;

#[test]
fn can_measure_elapsed_time() {
    let timer = Timer::start();

    sleep(Duration::from_millis(5));

    assert!(timer.elapsed_millis() >= 5);
}
