// demos/camera_stab.rs

use camera_stabilization::{
    AccessorySource, Attitude, AttitudeSource, CameraDesired, CameraDesiredSink, CameraStab,
    CameraStabSettings, Channel, InputSource, ObjectEvent, ObjectId, SettingsError,
    SettingsProvider, StabilizationMode,
};

/// Minimal object store standing in for the flight software.
struct Bus {
    settings: CameraStabSettings<f32>,
    attitude: Attitude<f32>,
    pitch_stick: Option<f32>,
    desired: CameraDesired<f32>,
}

impl SettingsProvider<f32> for Bus {
    fn settings(&self) -> Result<CameraStabSettings<f32>, SettingsError> {
        Ok(self.settings)
    }
}

impl AttitudeSource<f32> for Bus {
    fn attitude(&self) -> Attitude<f32> {
        self.attitude
    }
}

impl AccessorySource<f32> for Bus {
    fn accessory(&self, index: u8) -> Option<f32> {
        match index {
            0 => self.pitch_stick,
            _ => None,
        }
    }
}

impl CameraDesiredSink<f32> for Bus {
    fn set_camera_desired(&mut self, desired: CameraDesired<f32>) {
        self.desired = desired;
    }
}

fn main() {
    let mut settings = CameraStabSettings::<f32>::new();

    // Roll follows the aircraft only.
    settings[Channel::Roll].output_range = 45.0;

    // Pitch is steered by accessory 0 and held when the stick is centered.
    settings[Channel::Pitch].input = InputSource::Accessory(0);
    settings[Channel::Pitch].mode = StabilizationMode::AxisLock;
    settings[Channel::Pitch].input_range = 30.0;
    settings[Channel::Pitch].input_rate = 40.0;
    settings[Channel::Pitch].response_time_ms = 100;
    settings[Channel::Pitch].output_range = 60.0;

    let mut bus = Bus {
        settings,
        attitude: Attitude::default(),
        pitch_stick: None,
        desired: CameraDesired::default(),
    };
    let mut stabilizer = CameraStab::new(0);
    let event = ObjectEvent::updated(ObjectId::AttitudeActual);

    println!("   t,   roll,  pitch, stick,  cmd roll, cmd pitch");
    for step in 1..=40u32 {
        let now = step * 10;

        // Simulated aircraft rocking and a pilot nudging the camera down.
        bus.attitude.roll = if step % 20 < 10 { 5.0 } else { -5.0 };
        bus.attitude.pitch = 2.0;
        bus.pitch_stick = if step > 5 && step <= 25 { Some(-0.5) } else { Some(0.0) };

        match stabilizer.attitude_updated(&event, now, &mut bus) {
            Ok(_) => println!(
                "{:4}, {:6.2}, {:6.2}, {:5.2}, {:9.3}, {:9.3}",
                now,
                bus.attitude.roll,
                bus.attitude.pitch,
                bus.pitch_stick.unwrap_or(0.0),
                bus.desired.roll,
                bus.desired.pitch
            ),
            Err(e) => {
                println!("stabilizer stopped: {}", e);
                break;
            }
        }
    }
}
