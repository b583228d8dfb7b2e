//! 甲板指令
//!
//! 有限的指令集合，取代按名称查找方法的动态调用。
//! 每条指令由 [`Deck::execute`] 分发到对应的硬件对象。
//!
//! # 示例
//!
//! ```rust,ignore
//! use otbridge_sdk::{Deck, DeckCommand, Invoker, shared};
//!
//! let deck = shared(Deck::new(robot, pipette, tip_rack));
//! let handle = Deck::spawn_commands(
//!     &Invoker::default(),
//!     deck.clone(),
//!     [DeckCommand::Home, DeckCommand::SelectTipRow(3), DeckCommand::Run],
//! )?;
//! handle.join()?;
//! ```

use crate::helpers;
use otbridge_invoker::{GroupReport, InvokeError, Invoker, Shared, TaskHandle, WorkItem};
use otbridge_labware::{HardwareError, Labware, Pipette, Robot};
use std::fmt;

/// 甲板指令
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckCommand {
    /// 机器人回零
    Home,
    /// 执行已排队的运动
    Run,
    /// 急停
    Halt,
    /// 设置多通道移液器的起始枪头排
    SelectTipRow(usize),
}

impl fmt::Display for DeckCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckCommand::Home => write!(f, "robot.home"),
            DeckCommand::Run => write!(f, "robot.run"),
            DeckCommand::Halt => write!(f, "driver.halt"),
            DeckCommand::SelectTipRow(row) => write!(f, "pipette.start_at_tip({row})"),
        }
    }
}

/// 机器人 + 移液器 + 枪头盒
#[derive(Debug)]
pub struct Deck<R, P, L> {
    pub robot: R,
    pub pipette: P,
    pub tip_rack: L,
}

impl<R, P, L> Deck<R, P, L>
where
    R: Robot,
    P: Pipette,
    L: Labware,
{
    pub fn new(robot: R, pipette: P, tip_rack: L) -> Self {
        Self {
            robot,
            pipette,
            tip_rack,
        }
    }

    /// 同步执行一条指令
    pub fn execute(&mut self, command: &DeckCommand) -> Result<(), HardwareError> {
        match *command {
            DeckCommand::Home => self.robot.home(),
            DeckCommand::Run => self.robot.run(),
            DeckCommand::Halt => helpers::halt(&self.robot),
            DeckCommand::SelectTipRow(row) => {
                helpers::update_multichannel_start_row(&mut self.pipette, &self.tip_rack, row)
            },
        }
    }
}

impl<R, P, L> Deck<R, P, L>
where
    R: Robot + 'static,
    P: Pipette + 'static,
    L: Labware + Send + 'static,
{
    /// 在同一个后台线程上按顺序执行指令
    ///
    /// 每条指令执行期间持有甲板锁，指令之间释放。首个失败的指令终止后续指令。
    pub fn spawn_commands(
        invoker: &Invoker,
        deck: Shared<Self>,
        commands: impl IntoIterator<Item = DeckCommand>,
    ) -> Result<TaskHandle<GroupReport>, InvokeError> {
        let items = commands
            .into_iter()
            .map(|command| {
                WorkItem::locked(command.to_string(), deck.clone(), move |deck: &mut Self, _: &()| {
                    deck.execute(&command)
                })
            })
            .collect();
        invoker.spawn_group(items, ())
    }
}
