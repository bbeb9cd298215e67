use std::{error::Error, time::Duration};

use log::LevelFilter;
use qmaze::{
    algo::{QTableAgent, QTableAgentConfig},
    gym::{Maze, MazeConfig},
    viz::MazeView,
};

const ALPHA: f32 = 0.1;
const GAMMA: f32 = 0.9;
const NUM_EPISODES: u32 = 333;
const EPSILON: f32 = 0.7;
const STEP_DELAY: Duration = Duration::from_millis(400);

fn main() -> Result<(), Box<dyn Error>> {
    tui_logger::init_logger(LevelFilter::Debug)?;
    tui_logger::set_default_level(LevelFilter::Debug);

    let mut env = Maze::new(MazeConfig::default())?;
    let mut agent = QTableAgent::new(
        &env,
        QTableAgentConfig {
            alpha: ALPHA,
            gamma: GAMMA,
            epsilon: EPSILON,
            step_delay: STEP_DELAY,
            ..Default::default()
        },
    );

    let mut view = MazeView::new(&env)?;
    agent.learn(&mut env, &mut view, NUM_EPISODES, EPSILON);
    agent.play(&mut env, &mut view);
    view.wait_for_quit()?;

    Ok(())
}
