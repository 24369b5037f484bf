//! Story registry.
//!
//! Each record carries its own id, surface prompt, solution text, and
//! archetype tag, and is looked up by id. The built-in corpus is the five
//! canonical turtle-soup puzzles.

use turtlesoup_domain::{Archetype, DomainError, Story, StoryId};

use crate::infrastructure::ports::RandomPort;

/// Id-keyed registry of playable stories.
pub struct StoryRegistry {
    stories: Vec<Story>,
}

impl StoryRegistry {
    /// The built-in story corpus.
    pub fn builtin() -> Self {
        Self {
            stories: vec![
                Story::new(
                    "一个男人走进一家餐厅，点了一碗海龟汤。他尝了一口，然后自杀了。为什么？",
                    "这个男人曾经在海上遇难，在极度饥饿的情况下，他不得不吃同伴的尸体来生存。\
                     当他尝到海龟汤的味道时，想起了当时吃人肉的味道，因此选择了自杀。",
                    Archetype::Cannibalism,
                ),
                Story::new(
                    "一个女人在沙漠中迷路了。她找到了一具尸体，旁边有一瓶水。她喝了水，然后死了。为什么？",
                    "这具尸体是她的丈夫。他们在沙漠中迷路，丈夫为了让她活下去，选择了自杀，\
                     并留下了自己的血液作为水源。",
                    Archetype::Sacrifice,
                ),
                Story::new(
                    "一个男人住在10楼。每天他都会坐电梯到1楼出门。但是回家时，他总是坐电梯到7楼，\
                     然后走楼梯到10楼。为什么？",
                    "这个男人是个侏儒，他只能按到1楼的按钮。回家时，他只能按到7楼的按钮，\
                     然后走楼梯到10楼。",
                    Archetype::Physical,
                ),
                Story::new(
                    "一对夫妇在餐厅吃饭。丈夫点了一份牛排，妻子点了一份鱼。丈夫尝了一口妻子的鱼，\
                     然后死了。为什么？",
                    "妻子点的不是鱼，而是河豚。河豚有毒，丈夫尝了一口就中毒身亡了。",
                    Archetype::Poison,
                ),
                Story::new(
                    "一个男人走进一家酒吧，向酒保要了一杯水。酒保拿出一把枪指着他。男人说谢谢，\
                     然后离开了。为什么？",
                    "这个男人有打嗝的毛病，他需要一杯水来止嗝。酒保用枪指着他是一种止嗝的方法，\
                     因为惊吓可以止嗝。",
                    Archetype::Medical,
                ),
            ],
        }
    }

    /// Build a registry over a custom corpus. Must be non-empty.
    pub fn with_stories(stories: Vec<Story>) -> Result<Self, DomainError> {
        if stories.is_empty() {
            return Err(DomainError::validation("story registry cannot be empty"));
        }
        Ok(Self { stories })
    }

    pub fn get(&self, id: StoryId) -> Option<&Story> {
        self.stories.iter().find(|story| story.id == id)
    }

    /// Uniform random pick for a new room.
    pub fn pick(&self, random: &dyn RandomPort) -> &Story {
        let index = random.gen_range(0, self.stories.len() as i32 - 1).max(0) as usize;
        self.stories.get(index).unwrap_or_else(|| &self.stories[0])
    }

    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }
}

impl Default for StoryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
